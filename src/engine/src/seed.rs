use chrono::NaiveDate;
use rand::{rngs::StdRng, SeedableRng};
use rand_seeder::Seeder;

/// Create a deterministic seed from a free-form label
pub fn create_seed(label: &str) -> [u8; 32] {
    Seeder::from(label).make_seed()
}

pub fn seeded_rng(label: &str) -> StdRng {
    StdRng::from_seed(create_seed(label))
}

/// Seed label for the daily map, e.g. `2024-05-01`
pub fn daily_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

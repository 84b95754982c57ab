pub mod analytics;
pub mod config;
pub mod game;
pub mod seed;

#[cfg(test)]
mod test_utils;

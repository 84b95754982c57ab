use anyhow::{Context, Result};
use chrono::Utc;
use dotenvy::dotenv;
use serde_json::json;
use tracing::info;

use open_td::analytics::{Analytics, AnalyticsSink, EventParams, TracingBackend};
use open_td::config::{EngineConfig, OutputFormat};
use open_td::game::conversion::{SerializableMap, SerializablePool};
use open_td::game::{CaveGenerator, Neighbors};
use open_td::seed;

fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting terrain generator");

    let config = EngineConfig::from_env().context("Invalid configuration")?;
    let label = config
        .seed
        .clone()
        .unwrap_or_else(|| seed::daily_label(Utc::now().date_naive()));
    info!("Using seed '{}' with {} neighbor ordering", label, config.ordering.as_str());

    let mut rng = seed::seeded_rng(&label);
    let neighbors = config.ordering.build(config.pool_size, &mut rng);

    let generator = CaveGenerator::new(config.map_width, config.map_height, config.cave_open_ratio);
    let cave = generator.generate(&neighbors, &mut rng);

    let analytics = Analytics::new(TracingBackend);
    let mut params = EventParams::new();
    params.insert("seed".to_string(), json!(label));
    params.insert("ordering".to_string(), json!(config.ordering.as_str()));
    params.insert("width".to_string(), json!(config.map_width));
    params.insert("height".to_string(), json!(config.map_height));
    analytics.log_event("map_generated", Some(&params));

    match config.output_format {
        OutputFormat::Text => print!("{}", cave),
        OutputFormat::Json => {
            let mut output = serde_json::to_value(SerializableMap::new(&label, &cave))?;
            if let Neighbors::Pool(provider) = &neighbors {
                let pool = SerializablePool::from(provider.pool());
                output["neighbor_pool"] = serde_json::to_value(pool)?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    info!("Terrain generator finished successfully");
    Ok(())
}

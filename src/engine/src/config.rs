use std::env;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::game::{NeighborOrdering, DEFAULT_POOL_SIZE};

/// Upper bound on `MAP_WIDTH * MAP_HEIGHT`
pub const MAX_MAP_CELLS: usize = 1 << 20;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to read env file: {0}")]
    EnvFile(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub pool_size: NonZeroUsize,
    pub ordering: NeighborOrdering,
    /// Seed label; the daily date is used when absent
    pub seed: Option<String>,
    pub map_width: usize,
    pub map_height: usize,
    pub cave_open_ratio: f64,
    pub output_format: OutputFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            ordering: NeighborOrdering::Pool,
            seed: None,
            map_width: 48,
            map_height: 24,
            cave_open_ratio: 0.45,
            output_format: OutputFormat::Text,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings from a `.env` style file without touching the process environment
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_path_iter(path.as_ref())
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?
            .collect::<Result<Vec<(String, String)>, _>>()
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?;
        Self::from_vars(vars)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        Self::from_lookup(|key| {
            vars.iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(size) = lookup("NEIGHBOR_POOL_SIZE") {
            config.pool_size = parse("NEIGHBOR_POOL_SIZE", &size)?;
        }

        if let Some(ordering) = lookup("NEIGHBOR_ORDERING") {
            config.ordering = parse("NEIGHBOR_ORDERING", &ordering)?;
        }

        if let Some(seed) = lookup("MAP_SEED") {
            let seed = seed.trim();
            if !seed.is_empty() {
                config.seed = Some(seed.to_string());
            }
        }

        if let Some(width) = lookup("MAP_WIDTH") {
            config.map_width = parse("MAP_WIDTH", &width)?;
        }

        if let Some(height) = lookup("MAP_HEIGHT") {
            config.map_height = parse("MAP_HEIGHT", &height)?;
        }

        check_map_size(config.map_width, config.map_height)?;

        if let Some(ratio) = lookup("CAVE_OPEN_RATIO") {
            let value: f64 = parse("CAVE_OPEN_RATIO", &ratio)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: "CAVE_OPEN_RATIO",
                    value: ratio,
                    reason: "must be between 0 and 1".to_string(),
                });
            }
            config.cave_open_ratio = value;
        }

        if let Some(format) = lookup("OUTPUT_FORMAT") {
            config.output_format = parse("OUTPUT_FORMAT", &format)?;
        }

        Ok(config)
    }
}

fn check_map_size(width: usize, height: usize) -> Result<(), ConfigError> {
    let invalid = |key: &'static str, value: usize, reason: &str| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if width == 0 {
        return Err(invalid("MAP_WIDTH", width, "must be at least 1"));
    }
    if height == 0 {
        return Err(invalid("MAP_HEIGHT", height, "must be at least 1"));
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_MAP_CELLS => Ok(()),
        _ => Err(ConfigError::InvalidValue {
            key: "MAP_WIDTH",
            value: format!("{}x{}", width, height),
            reason: format!("map may hold at most {} cells", MAX_MAP_CELLS),
        }),
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_vars(vec![]).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.pool_size.get(), 5);
        assert_eq!(config.ordering, NeighborOrdering::Pool);
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_vars(vars(&[
            ("NEIGHBOR_POOL_SIZE", "12"),
            ("NEIGHBOR_ORDERING", "fresh"),
            ("MAP_SEED", "  level-3 "),
            ("MAP_WIDTH", "10"),
            ("MAP_HEIGHT", "8"),
            ("CAVE_OPEN_RATIO", "0.6"),
            ("OUTPUT_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.pool_size.get(), 12);
        assert_eq!(config.ordering, NeighborOrdering::Fresh);
        assert_eq!(config.seed.as_deref(), Some("level-3"));
        assert_eq!((config.map_width, config.map_height), (10, 8));
        assert_eq!(config.cave_open_ratio, 0.6);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let err = EngineConfig::from_vars(vars(&[("NEIGHBOR_POOL_SIZE", "0")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "NEIGHBOR_POOL_SIZE"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(EngineConfig::from_vars(vars(&[("NEIGHBOR_ORDERING", "spiral")])).is_err());
        assert!(EngineConfig::from_vars(vars(&[("MAP_WIDTH", "wide")])).is_err());
        assert!(EngineConfig::from_vars(vars(&[("CAVE_OPEN_RATIO", "1.5")])).is_err());
    }

    #[test]
    fn test_overflowing_map_size_rejected() {
        let err = EngineConfig::from_vars(vars(&[
            ("MAP_WIDTH", "18446744073709551615"),
            ("MAP_HEIGHT", "2"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value, .. } => {
                assert_eq!(key, "MAP_WIDTH");
                assert_eq!(value, "18446744073709551615x2");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_map_size_limits() {
        assert!(EngineConfig::from_vars(vars(&[("MAP_WIDTH", "0")])).is_err());
        assert!(EngineConfig::from_vars(vars(&[("MAP_HEIGHT", "0")])).is_err());
        let too_big = vars(&[("MAP_WIDTH", "4096"), ("MAP_HEIGHT", "512")]);
        assert!(EngineConfig::from_vars(too_big).is_err());

        let largest = vars(&[("MAP_WIDTH", "1024"), ("MAP_HEIGHT", "1024")]);
        let config = EngineConfig::from_vars(largest).unwrap();
        assert_eq!(config.map_width * config.map_height, MAX_MAP_CELLS);
    }

    #[test]
    fn test_blank_seed_ignored() {
        let config = EngineConfig::from_vars(vars(&[("MAP_SEED", "   ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_from_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NEIGHBOR_ORDERING=fixed").unwrap();
        writeln!(file, "MAP_SEED=daily").unwrap();
        writeln!(file, "MAP_WIDTH=20").unwrap();
        file.flush().unwrap();

        let config = EngineConfig::from_env_file(file.path()).unwrap();
        assert_eq!(config.ordering, NeighborOrdering::Fixed);
        assert_eq!(config.seed.as_deref(), Some("daily"));
        assert_eq!(config.map_width, 20);
    }

    #[test]
    fn test_missing_env_file() {
        let err = EngineConfig::from_env_file("/definitely/not/here/.env").unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
    }
}

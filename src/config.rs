use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::infrastructure::SeedError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got {0:?}")]
    InvalidPort(String),

    #[error("ID_STRATEGY must be `uuid` or `sequential`, got {0:?}")]
    UnknownIdStrategy(String),

    #[error("no sequential id follows seeded id {0}")]
    IdsExhausted(u64),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// How new dish and order ids are minted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "sequential" => Ok(IdStrategy::Sequential),
            _ => Err(ConfigError::UnknownIdStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub id_strategy: IdStrategy,
    pub seed_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            id_strategy: IdStrategy::default(),
            seed_file: None,
        }
    }
}

impl Settings {
    /// Reads `HOST`, `PORT`, `ID_STRATEGY` and `SEED_FILE` from the process
    /// environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };
        let id_strategy = match lookup("ID_STRATEGY") {
            Some(raw) => raw.parse()?,
            None => defaults.id_strategy,
        };
        let seed_file = lookup("SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Settings {
            host,
            port,
            id_strategy,
            seed_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings(&[]).expect("defaults"), Settings::default());
    }

    #[test]
    fn reads_every_variable() {
        let s = settings(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "5000"),
            ("ID_STRATEGY", "Sequential"),
            ("SEED_FILE", "data/seed.json"),
        ])
        .expect("valid settings");
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.port, 5000);
        assert_eq!(s.id_strategy, IdStrategy::Sequential);
        assert_eq!(s.seed_file, Some(PathBuf::from("data/seed.json")));
    }

    #[test]
    fn rejects_bad_port() {
        let err = settings(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref raw) if raw == "eighty"));
    }

    #[test]
    fn rejects_unknown_id_strategy() {
        let err = settings(&[("ID_STRATEGY", "random")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ID_STRATEGY must be `uuid` or `sequential`, got \"random\""
        );
    }

    #[test]
    fn blank_seed_file_is_ignored() {
        assert_eq!(settings(&[("SEED_FILE", " ")]).expect("valid").seed_file, None);
    }
}

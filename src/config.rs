use serde::Deserialize;

use std::{env, fs, path::Path, time::Duration};

use crate::models::ListOrder;

pub const CONFIG_PATH_VAR: &str = "NOTES_API_CONFIG";
pub const ENV_PREFIX: &str = "NOTES_API_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string, including credentials and `sslmode`.
    pub database_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: usize,
    /// How long a request waits for a pooled connection.
    #[serde(default = "default_pool_timeout", with = "humantime_serde")]
    pub pool_timeout: Duration,
    #[serde(default)]
    pub list_order: ListOrder,
}

const fn default_port() -> u16 {
    8000
}

const fn default_pool_max_size() -> usize {
    16
}

const fn default_pool_timeout() -> Duration {
    Duration::from_secs(5)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{path}', 'config.yaml', and NOTES_API_* variables. Error: {source}"
    )]
    Env { path: String, source: envy::Error },

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

impl Config {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must not be empty"));
        }
        if self.pool_max_size == 0 {
            return Err(ConfigError::Invalid("pool_max_size must be at least 1"));
        }
        Ok(self)
    }
}

fn from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
        path: path.to_string(),
        source,
    })
}

fn from_env_vars<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed(ENV_PREFIX).from_iter(vars)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.yaml".to_string());

    let config = if Path::new(&config_path).exists() {
        from_file(&config_path)?
    } else if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        from_file("config.yaml")?
    } else {
        tracing::info!(
            "No config file found, attempting to load configuration from environment variables"
        );
        from_env_vars(env::vars()).map_err(|source| ConfigError::Env {
            path: config_path,
            source,
        })?
    };

    Ok(config.validate()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn yaml_applies_defaults() {
        let cfg: Config =
            serde_yaml::from_str("database_url: postgres://localhost/notes\n").unwrap();

        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.pool_max_size, 16);
        assert_eq!(cfg.pool_timeout, Duration::from_secs(5));
        assert_eq!(cfg.list_order, ListOrder::Asc);
    }

    #[test]
    fn yaml_reads_every_key() {
        let cfg: Config = serde_yaml::from_str(
            "database_url: postgres://localhost/notes\n\
             port: 9090\n\
             pool_max_size: 4\n\
             pool_timeout: 250ms\n\
             list_order: desc\n",
        )
        .unwrap();

        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.pool_max_size, 4);
        assert_eq!(cfg.pool_timeout, Duration::from_millis(250));
        assert_eq!(cfg.list_order, ListOrder::Desc);
    }

    #[test]
    fn env_vars_use_prefix() {
        let cfg = from_env_vars(vars(&[
            ("NOTES_API_DATABASE_URL", "postgres://localhost/notes"),
            ("NOTES_API_PORT", "8080"),
            ("NOTES_API_LIST_ORDER", "desc"),
            ("DATABASE_URL", "ignored"),
        ]))
        .unwrap();

        assert_eq!(cfg.database_url, "postgres://localhost/notes");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.list_order, ListOrder::Desc);
    }

    #[test]
    fn env_vars_require_database_url() {
        assert!(from_env_vars(vars(&[("NOTES_API_PORT", "8080")])).is_err());
    }

    #[test]
    fn validate_rejects_empty_pool() {
        let cfg: Config = serde_yaml::from_str(
            "database_url: postgres://localhost/notes\npool_max_size: 0\n",
        )
        .unwrap();

        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid("pool_max_size must be at least 1"))
        ));
    }

    #[test]
    fn validate_rejects_blank_database_url() {
        let cfg: Config = serde_yaml::from_str("database_url: \"  \"\n").unwrap();

        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid("database_url must not be empty"))
        ));
    }
}

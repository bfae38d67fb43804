use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_DATABASE: &str = "fiber-hrms";

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub connect_timeout_secs: u64,
}

impl MongoConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl EmployeeConfig {
    pub fn load() -> Result<Self, AppError> {
        // Loads .env and APP__ prefixed settings
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(EmployeeConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: Secret::new(get_env(
                    "MONGODB_URI",
                    Some("mongodb://localhost:27017"),
                    is_prod,
                )?),
                database: get_env("MONGODB_DATABASE", Some(DEFAULT_DATABASE), is_prod)?,
                connect_timeout_secs: get_env("MONGODB_CONNECT_TIMEOUT_SECS", Some("30"), false)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "MONGODB_CONNECT_TIMEOUT_SECS must be a number of seconds: {}",
                            e
                        ))
                    })?,
            },
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

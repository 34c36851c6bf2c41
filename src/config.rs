use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Server settings read from the environment (and `.env` if present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub site_addr: SocketAddr,
    pub log_format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl AppConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite:calibration.db";
    pub const DEFAULT_SITE_ADDR: &'static str = "127.0.0.1:3000";

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; used by `from_env` and tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.into());

        let addr = lookup("SITE_ADDR").unwrap_or_else(|| Self::DEFAULT_SITE_ADDR.into());
        let site_addr = addr.parse().map_err(|_| ConfigError::InvalidValue {
            field: "SITE_ADDR",
            value: addr.clone(),
        })?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            None => LogFormat::Compact,
            Some(f) if f == "compact" => LogFormat::Compact,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: "LOG_FORMAT",
                    value: other,
                })
            }
        };

        Ok(Self {
            database_url,
            site_addr,
            log_format,
        })
    }
}

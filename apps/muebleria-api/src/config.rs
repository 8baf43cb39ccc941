use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use strum::{Display, EnumString};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Database used when neither `MONGODB_DATABASE` nor `MONGO_DATABASE` is set
pub const DEFAULT_DATABASE: &str = "muebleria";

const CONNECTION_MODE_VAR: &str = "DB_CONNECTION_MODE";

/// How repositories obtain MongoDB connections
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConnectionMode {
    /// One client and pool shared by every request
    #[default]
    Pooled,
    /// A fresh client per operation, closed right after
    PerRequest,
    /// No MongoDB at all; data lives in process memory
    Memory,
}

impl ConnectionMode {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default(CONNECTION_MODE_VAR, "pooled");
        raw.parse().map_err(|_| ConfigError::ParseError {
            key: CONNECTION_MODE_VAR.to_string(),
            details: format!("'{}' is not one of pooled, per_request, memory", raw),
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// Absent in [`ConnectionMode::Memory`]
    pub mongodb: Option<MongoConfig>,
    pub connection_mode: ConnectionMode,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let connection_mode = ConnectionMode::from_env()?;
        let app = app_info!();

        let mongodb = match connection_mode {
            ConnectionMode::Memory => None,
            ConnectionMode::Pooled | ConnectionMode::PerRequest => Some(
                MongoConfig::from_env_or_database(DEFAULT_DATABASE)?.with_app_name(app.name),
            ),
        };
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app,
            mongodb,
            connection_mode,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: [(&str, Option<&str>); 6] = [
        ("MONGODB_URL", None),
        ("MONGO_URL", None),
        ("DATABASE_URL", None),
        ("MONGODB_DATABASE", None),
        ("MONGO_DATABASE", None),
        (CONNECTION_MODE_VAR, None),
    ];

    #[test]
    fn test_connection_mode_parsing() {
        assert_eq!("pooled".parse::<ConnectionMode>().unwrap(), ConnectionMode::Pooled);
        assert_eq!(
            "per_request".parse::<ConnectionMode>().unwrap(),
            ConnectionMode::PerRequest
        );
        assert_eq!("MEMORY".parse::<ConnectionMode>().unwrap(), ConnectionMode::Memory);
        assert_eq!(ConnectionMode::PerRequest.to_string(), "per_request");
    }

    #[test]
    fn test_defaults_to_pooled_with_muebleria_database() {
        temp_env::with_vars(UNSET, || {
            temp_env::with_var("DATABASE_URL", Some("mongodb://db:27017"), || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.connection_mode, ConnectionMode::Pooled);
                let mongodb = config.mongodb.unwrap();
                assert_eq!(mongodb.url(), "mongodb://db:27017");
                assert_eq!(mongodb.database(), DEFAULT_DATABASE);
            });
        });
    }

    #[test]
    fn test_memory_mode_needs_no_url() {
        temp_env::with_vars(UNSET, || {
            temp_env::with_var(CONNECTION_MODE_VAR, Some("memory"), || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.connection_mode, ConnectionMode::Memory);
                assert!(config.mongodb.is_none());
            });
        });
    }

    #[test]
    fn test_missing_url_is_an_error() {
        temp_env::with_vars(UNSET, || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        temp_env::with_var(CONNECTION_MODE_VAR, Some("sharded"), || {
            assert!(ConnectionMode::from_env().is_err());
        });
    }
}

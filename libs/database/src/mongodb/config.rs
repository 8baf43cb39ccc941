#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_first};

/// Variables consulted, in order, for the connection string
pub const URL_VARS: [&str; 3] = ["MONGODB_URL", "MONGO_URL", "DATABASE_URL"];

/// Variables consulted, in order, for the database name
pub const DATABASE_VARS: [&str; 2] = ["MONGODB_DATABASE", "MONGO_DATABASE"];

/// MongoDB database configuration
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "muebleria");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Logical database name
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection string with any password replaced, safe for logs
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        match rest.split_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

#[cfg(feature = "config")]
impl MongoConfig {
    /// Like [`FromEnv::from_env`], but the database name is optional and
    /// falls back to `default_database`.
    ///
    /// Environment variables:
    /// - `MONGODB_URL`, `MONGO_URL` or `DATABASE_URL` (required)
    /// - `MONGODB_DATABASE` or `MONGO_DATABASE`
    /// - `MONGODB_APP_NAME`
    /// - `MONGODB_MAX_POOL_SIZE` (default: 100)
    /// - `MONGODB_MIN_POOL_SIZE` (default: 5)
    /// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
    /// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
    pub fn from_env_or_database(default_database: &str) -> Result<Self, ConfigError> {
        let database = env_first(&DATABASE_VARS)
            .map(|(_, value)| value)
            .unwrap_or_else(|| default_database.to_string());
        Self::load(database)
    }

    fn load(database: String) -> Result<Self, ConfigError> {
        let (_, url) =
            env_first(&URL_VARS).ok_or_else(|| ConfigError::MissingEnvVar(URL_VARS.join(" or ")))?;
        let defaults = Self::default();

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_first(&["MONGODB_MAX_POOL_SIZE"], defaults.max_pool_size)?,
            min_pool_size: env_parse_first(&["MONGODB_MIN_POOL_SIZE"], defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_first(
                &["MONGODB_CONNECT_TIMEOUT_SECS"],
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_first(
                &["MONGODB_SERVER_SELECTION_TIMEOUT_SECS"],
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

/// Both the connection string and the database name are required.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let (_, database) = env_first(&DATABASE_VARS)
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_VARS.join(" or ")))?;
        Self::load(database)
    }
}

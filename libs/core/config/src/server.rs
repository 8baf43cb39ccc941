use crate::{env_first, env_parse_first, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - SERVER_HOST or HOST: defaults to 0.0.0.0 (all interfaces)
    /// - SERVER_PORT or PORT: defaults to 8080
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_first(&["SERVER_HOST", "HOST"])
            .map(|(_, value)| value)
            .unwrap_or_else(|| Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_first(&["SERVER_PORT", "PORT"], 8080)?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: [(&str, Option<&str>); 4] = [
        ("SERVER_HOST", None),
        ("HOST", None),
        ("SERVER_PORT", None),
        ("PORT", None),
    ];

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars(UNSET, || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8080);
            assert_eq!(config.address(), "0.0.0.0:8080");
        });
    }

    #[test]
    fn test_server_config_prefers_server_prefixed_vars() {
        temp_env::with_vars(
            [
                ("SERVER_HOST", Some("127.0.0.1")),
                ("HOST", Some("10.0.0.1")),
                ("SERVER_PORT", Some("3000")),
                ("PORT", Some("4000")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:3000");
            },
        );
    }

    #[test]
    fn test_server_config_falls_back_to_plain_vars() {
        temp_env::with_vars(
            [
                ("SERVER_HOST", None),
                ("HOST", Some("localhost")),
                ("SERVER_PORT", None),
                ("PORT", Some("9000")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.host, "localhost");
                assert_eq!(config.port, 9000);
            },
        );
    }

    #[test]
    fn test_server_config_from_env_invalid_port() {
        temp_env::with_vars(
            [("SERVER_PORT", Some("not_a_number")), ("PORT", None)],
            || {
                let err = ServerConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("SERVER_PORT"));
            },
        );
    }

    #[test]
    fn test_server_config_from_env_port_out_of_range() {
        temp_env::with_vars([("SERVER_PORT", None), ("PORT", Some("99999"))], || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::UNSPECIFIED.to_string());
        assert_eq!(config.port, 8080);
    }
}

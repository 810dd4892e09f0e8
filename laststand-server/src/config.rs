use figment::{providers::Env, Figment};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

/// Used when `DATABASE_URL` is unset; data lives only as long as the process.
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// In-memory SQLite databases are private to a single connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    pub database: DatabaseConfig,
    /// Server port
    pub port: u16,
    /// Server host address
    pub host: IpAddr,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u32,
    /// How long a login stays valid, in days
    pub session_ttl_days: u32,
}

impl Config {
    pub fn session_ttl_millis(&self) -> i64 {
        i64::from(self.session_ttl_days) * 24 * 60 * 60 * 1000
    }
}

/// Raw configuration loaded directly from environment variables
/// This is an intermediate representation that gets validated and converted to Config
#[derive(Debug, Deserialize)]
struct RawConfig {
    // Database
    database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    database_max_connections: u32,

    // Server
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_host")]
    host: IpAddr,
    #[serde(default = "default_shutdown_timeout")]
    shutdown_timeout_seconds: u32,

    // Sessions
    #[serde(default = "default_session_ttl_days")]
    session_ttl_days: u32,
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        if raw.session_ttl_days == 0 {
            return Err("SESSION_TTL_DAYS must be at least 1".into());
        }
        if raw.database_max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be at least 1".into());
        }

        let url = raw
            .database_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| IN_MEMORY_DATABASE_URL.to_string());

        Ok(Config {
            database: DatabaseConfig {
                url,
                max_connections: raw.database_max_connections,
            },
            port: raw.port,
            host: raw.host,
            shutdown_timeout_seconds: raw.shutdown_timeout_seconds,
            session_ttl_days: raw.session_ttl_days,
        })
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

fn default_shutdown_timeout() -> u32 {
    5
}

fn default_session_ttl_days() -> u32 {
    30
}

fn default_max_connections() -> u32 {
    5
}

pub fn load_config() -> Result<Config, figment::Error> {
    Figment::new().merge(Env::raw()).extract()
}

/// Create a minimal config for testing
#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: IN_MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
        },
        port: 0,
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        shutdown_timeout_seconds: 5,
        session_ttl_days: 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawConfig {
        RawConfig {
            database_url: None,
            database_max_connections: default_max_connections(),
            port: default_port(),
            host: default_host(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
            session_ttl_days: default_session_ttl_days(),
        }
    }

    #[test]
    fn test_missing_database_url_falls_back_to_memory() {
        let config = Config::try_from(raw()).unwrap();
        assert_eq!(config.database.url, IN_MEMORY_DATABASE_URL);
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn test_blank_database_url_falls_back_to_memory() {
        let config = Config::try_from(RawConfig {
            database_url: Some("   ".into()),
            ..raw()
        })
        .unwrap();
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn test_file_database_is_not_in_memory() {
        let config = Config::try_from(RawConfig {
            database_url: Some("sqlite://laststand.db".into()),
            ..raw()
        })
        .unwrap();
        assert!(!config.database.is_in_memory());
    }

    #[test]
    fn test_zero_session_ttl_is_rejected() {
        let result = Config::try_from(RawConfig {
            session_ttl_days: 0,
            ..raw()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_session_ttl_millis() {
        let config = test_config();
        assert_eq!(config.session_ttl_millis(), 30 * 86_400_000);
    }
}

//! Configuration for the Serein server.

use std::env;

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_path: String,
    /// Directory served as the web frontend.
    pub static_dir: String,
}

impl Config {
    /// Build from an arbitrary variable lookup, so tests never have to touch
    /// process-wide environment state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("SEREIN_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            database_path: lookup("SEREIN_DATABASE").unwrap_or_else(|| "database.db".to_string()),
            static_dir: lookup("SEREIN_STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 3001);
        assert_eq!(config.database_path, "database.db");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = Config::from_lookup(|key| match key {
            "SEREIN_PORT" => Some("8080".to_string()),
            "SEREIN_DATABASE" => Some("/data/tasks.db".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "/data/tasks.db");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = Config::from_lookup(|key| {
            (key == "SEREIN_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.port, 3001);
    }
}

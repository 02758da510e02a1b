//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::domain::ConsortiumMap;
use crate::feed::FeedConfig;

/// Default refresh cadence: one minute.
const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Errors in the process configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but unusable
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },

    /// The consortium file could not be loaded
    #[error("cannot load consortia from {path:?}: {message}")]
    Consortia { path: PathBuf, message: String },
}

/// Everything the server needs at start-up, as immutable values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub consortia: ConsortiumMap,
    pub refresh_interval: Duration,
    /// JSON file backing the store; in-memory when `None`
    pub store_path: Option<PathBuf>,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    ///
    /// | variable | meaning |
    /// |---|---|
    /// | `FEED_HOST` | feed provider host (required) |
    /// | `FEED_ITINERARY_PATH` | path template with `$$` for the line |
    /// | `FEED_TIMEOUT_SECS` | request timeout |
    /// | `REFRESH_INTERVAL_MS` | refresh cadence |
    /// | `CONSORTIUMS_FILE` | JSON array of `{name, lines}` |
    /// | `STORE_PATH` | JSON file backing the store |
    /// | `LISTEN_ADDR` | HTTP bind address |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let host = get("FEED_HOST").ok_or(ConfigError::Missing("FEED_HOST"))?;
        let mut feed = FeedConfig::new(host);
        if let Some(path) = get("FEED_ITINERARY_PATH") {
            feed = feed.with_itinerary_path(path);
        }
        if let Some(secs) = get("FEED_TIMEOUT_SECS") {
            feed = feed.with_timeout(parse_number("FEED_TIMEOUT_SECS", &secs)?);
        }

        let refresh_ms = match get("REFRESH_INTERVAL_MS") {
            Some(ms) => parse_number("REFRESH_INTERVAL_MS", &ms)?,
            None => DEFAULT_REFRESH_INTERVAL_MS,
        };
        if refresh_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "REFRESH_INTERVAL_MS",
                message: "must be greater than zero".to_string(),
            });
        }

        let consortia = match get("CONSORTIUMS_FILE") {
            Some(path) => load_consortia(PathBuf::from(path))?,
            None => {
                warn!("CONSORTIUMS_FILE not set; keywords will carry no consortium");
                ConsortiumMap::default()
            }
        };

        let listen = get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: "LISTEN_ADDR",
            message: format!("{listen}: {e}"),
        })?;

        Ok(Self {
            feed,
            consortia,
            refresh_interval: Duration::from_millis(refresh_ms),
            store_path: get("STORE_PATH").map(PathBuf::from),
            listen_addr,
        })
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
        var,
        message: format!("{value}: {e}"),
    })
}

fn load_consortia(path: PathBuf) -> Result<ConsortiumMap, ConfigError> {
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            return Err(ConfigError::Consortia {
                path,
                message: e.to_string(),
            });
        }
    };
    ConsortiumMap::from_json(&json).map_err(|e| ConfigError::Consortia {
        path,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[("FEED_HOST", "feeds.example.org")]).unwrap();
        assert_eq!(config.feed.host, "feeds.example.org");
        assert_eq!(
            config.refresh_interval,
            Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS)
        );
        assert_eq!(config.store_path, None);
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert!(config.consortia.is_empty());
    }

    #[test]
    fn host_is_required() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing("FEED_HOST"))));
        assert!(matches!(
            config(&[("FEED_HOST", "  ")]),
            Err(ConfigError::Missing("FEED_HOST"))
        ));
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("FEED_HOST", "localhost:9000"),
            ("FEED_ITINERARY_PATH", "/lines/$$.csv"),
            ("FEED_TIMEOUT_SECS", "5"),
            ("REFRESH_INTERVAL_MS", "250"),
            ("STORE_PATH", "/var/lib/itineraries.json"),
            ("LISTEN_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();

        assert_eq!(config.feed.itinerary_url("7"), "http://localhost:9000/lines/7.csv");
        assert_eq!(config.feed.timeout_secs, 5);
        assert_eq!(config.refresh_interval, Duration::from_millis(250));
        assert_eq!(
            config.store_path,
            Some(PathBuf::from("/var/lib/itineraries.json"))
        );
        assert_eq!(config.listen_addr.port(), 8080);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            config(&[("FEED_HOST", "h"), ("REFRESH_INTERVAL_MS", "soon")]),
            Err(ConfigError::Invalid { var: "REFRESH_INTERVAL_MS", .. })
        ));
        assert!(matches!(
            config(&[("FEED_HOST", "h"), ("REFRESH_INTERVAL_MS", "0")]),
            Err(ConfigError::Invalid { var: "REFRESH_INTERVAL_MS", .. })
        ));
        assert!(matches!(
            config(&[("FEED_HOST", "h"), ("LISTEN_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { var: "LISTEN_ADDR", .. })
        ));
    }

    #[test]
    fn loads_consortia_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("consortia.json");
        std::fs::write(
            &path,
            r#"[{"name":"A","lines":["42"]},{"name":"B","lines":["42","7"]}]"#,
        )
        .unwrap();

        let config = config(&[
            ("FEED_HOST", "h"),
            ("CONSORTIUMS_FILE", path.to_str().unwrap()),
        ])
        .unwrap();
        assert_eq!(config.consortia.classify("42"), "B");
    }

    #[test]
    fn missing_consortia_file_is_an_error() {
        let result = config(&[
            ("FEED_HOST", "h"),
            ("CONSORTIUMS_FILE", "/nonexistent/consortia.json"),
        ]);
        assert!(matches!(result, Err(ConfigError::Consortia { .. })));
    }
}

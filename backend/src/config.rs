//! Runtime configuration.
//!
//! Defaults live in constants; `.env` and the process environment can
//! override them (see [`Settings::from_env`]).

use std::env;
use std::path::PathBuf;

/// Default HTTP port for `tripboard serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Maximum payload size accepted by the loaders and the upload endpoint.
///
/// 10 MB limit.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Capacity of the log broadcast channel.
pub const LOG_CHANNEL_CAPACITY: usize = 100;

pub const ENV_PORT: &str = "TRIPBOARD_PORT";
pub const ENV_MAX_PAYLOAD_BYTES: &str = "TRIPBOARD_MAX_PAYLOAD_BYTES";
pub const ENV_COORDINATES: &str = "TRIPBOARD_COORDINATES";

/// Settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub max_payload_bytes: usize,
    /// JSON coordinate table replacing the built-in one.
    pub coordinates_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            coordinates_path: None,
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read overrides from the environment.
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup(ENV_PORT)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            max_payload_bytes: lookup(ENV_MAX_PAYLOAD_BYTES)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_payload_bytes),
            coordinates_path: lookup(ENV_COORDINATES)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_PORT, "8080"),
            (ENV_MAX_PAYLOAD_BYTES, "1024"),
            (ENV_COORDINATES, "places.json"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.max_payload_bytes, 1024);
        assert_eq!(settings.coordinates_path, Some(PathBuf::from("places.json")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let settings = Settings::from_lookup(|k| match k {
            ENV_PORT => Some("not-a-port".into()),
            ENV_COORDINATES => Some("  ".into()),
            _ => None,
        });
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.coordinates_path, None);
    }
}

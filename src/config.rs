//! Resolver configuration from the environment.
//!
//! | variable | default |
//! |----------|---------|
//! | `FARE_MAPS_API_KEY` (or `GOOGLE_MAPS_API_KEY`) | unset: live lookup disabled |
//! | `FARE_MAPS_ENDPOINT` | Google Distance Matrix JSON endpoint |
//! | `FARE_LOOKUP_TIMEOUT_SECS` | 5 |

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    /// Bound on the whole live request; past it the offline tier answers.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ResolverConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source (for testing).
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_empty("FARE_MAPS_API_KEY").or_else(|| non_empty("GOOGLE_MAPS_API_KEY"));
        if api_key.is_none() {
            debug!("No maps API key set, live distance lookup disabled");
        }

        let endpoint = non_empty("FARE_MAPS_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout_secs: u64 = parse_or(
            "FARE_LOOKUP_TIMEOUT_SECS",
            non_empty("FARE_LOOKUP_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        );

        Self {
            api_key,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T
where
    T::Err: Display,
{
    match raw {
        None => default,
        Some(v) => v.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{v}': {e}, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> ResolverConfig {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ResolverConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from(&[]);
        assert!(config.api_key.is_none());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_primary_key_wins() {
        let config = from(&[("FARE_MAPS_API_KEY", "primary"), ("GOOGLE_MAPS_API_KEY", "legacy")]);
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_legacy_key_and_blank_primary() {
        let config = from(&[("FARE_MAPS_API_KEY", "  "), ("GOOGLE_MAPS_API_KEY", "legacy")]);
        assert_eq!(config.api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_timeout_parse() {
        assert_eq!(from(&[("FARE_LOOKUP_TIMEOUT_SECS", "2")]).timeout, Duration::from_secs(2));
        assert_eq!(
            from(&[("FARE_LOOKUP_TIMEOUT_SECS", "soon")]).timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_endpoint_override() {
        let config = from(&[("FARE_MAPS_ENDPOINT", "http://localhost:8080/matrix")]);
        assert_eq!(config.endpoint, "http://localhost:8080/matrix");
    }
}

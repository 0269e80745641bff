//! Live distance providers.

use super::types::{round_tenth, LookupError, MatrixLookup};
use crate::config::ResolverConfig;
use serde::Deserialize;
use std::time::Duration;

/// A live source of road distances between two free-text addresses.
pub trait DistanceProvider: Send {
    fn lookup(&self, origin: &str, destination: &str) -> MatrixLookup;
}

// ─── Distance Matrix API ────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct MatrixResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Deserialize, Debug)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Deserialize, Debug)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<MatrixValue>,
}

#[derive(Deserialize, Debug)]
struct MatrixValue {
    /// Metres.
    value: f64,
}

/// Extract the first route element's distance in km, rounded to 0.1.
fn interpret(response: MatrixResponse) -> Result<f64, LookupError> {
    if let Some(status) = response.status.as_deref() {
        if status != "OK" {
            let detail = response
                .error_message
                .map(|m| format!("{}: {}", status, m))
                .unwrap_or_else(|| status.to_string());
            return Err(LookupError::RequestStatus(detail));
        }
    }

    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| LookupError::InvalidResponse("no route element".into()))?;

    if element.status != "OK" {
        return Err(LookupError::ElementStatus(element.status));
    }

    let meters = element
        .distance
        .map(|d| d.value)
        .ok_or_else(|| LookupError::InvalidResponse("element has no distance".into()))?;

    if !meters.is_finite() || meters < 0.0 {
        return Err(LookupError::InvalidResponse(format!("bad distance value {}", meters)));
    }

    // A route that rounds to 0.0 km is not a usable trip distance.
    let km = round_tenth(meters / 1000.0);
    if km <= 0.0 {
        return Err(LookupError::InvalidResponse(format!("zero-length route ({} m)", meters)));
    }
    Ok(km)
}

/// Google-style Distance Matrix client.
pub struct GoogleDistanceMatrix {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
}

impl GoogleDistanceMatrix {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("fare-engine/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from configuration. `None` when no API key is set.
    pub fn from_config(config: &ResolverConfig) -> Option<Self> {
        let key = config.api_key.as_deref()?;
        Some(Self::new(config.endpoint.clone(), key, config.timeout))
    }

    fn fetch(&self, origin: &str, destination: &str) -> Result<f64, LookupError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("units", "metric")
            .query("origins", origin)
            .query("destinations", destination)
            .query("key", &self.api_key)
            .call()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let body: MatrixResponse = response
            .into_json()
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        interpret(body)
    }
}

impl DistanceProvider for GoogleDistanceMatrix {
    fn lookup(&self, origin: &str, destination: &str) -> MatrixLookup {
        self.fetch(origin, destination).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceResolver, DistanceSource};
    use std::net::TcpListener;
    use std::time::Instant;

    fn parse(json: &str) -> Result<f64, LookupError> {
        interpret(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_ok_element() {
        let km = parse(
            r#"{
                "status": "OK",
                "origin_addresses": ["Bandra West, Mumbai"],
                "destination_addresses": ["Andheri, Mumbai"],
                "rows": [{"elements": [{
                    "status": "OK",
                    "distance": {"text": "9.6 km", "value": 9649},
                    "duration": {"text": "31 mins", "value": 1850}
                }]}]
            }"#,
        )
        .unwrap();
        assert_eq!(km, 9.6);
    }

    #[test]
    fn test_rounds_to_tenth() {
        let km = parse(r#"{"rows":[{"elements":[{"status":"OK","distance":{"value":148260}}]}]}"#).unwrap();
        assert_eq!(km, 148.3);
    }

    #[test]
    fn test_element_not_found() {
        let err = parse(r#"{"status":"OK","rows":[{"elements":[{"status":"NOT_FOUND"}]}]}"#).unwrap_err();
        assert!(matches!(err, LookupError::ElementStatus(s) if s == "NOT_FOUND"));
    }

    #[test]
    fn test_request_denied() {
        let err = parse(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid.","rows":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LookupError::RequestStatus(ref s) if s.starts_with("REQUEST_DENIED")));
    }

    #[test]
    fn test_missing_rows() {
        assert!(matches!(
            parse(r#"{"status":"OK","rows":[]}"#),
            Err(LookupError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse(r#"{"status":"OK","rows":[{"elements":[]}]}"#),
            Err(LookupError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_ok_without_distance() {
        assert!(matches!(
            parse(r#"{"rows":[{"elements":[{"status":"OK"}]}]}"#),
            Err(LookupError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_zero_distance_is_unusable() {
        assert!(matches!(
            parse(r#"{"rows":[{"elements":[{"status":"OK","distance":{"value":0}}]}]}"#),
            Err(LookupError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse(r#"{"rows":[{"elements":[{"status":"OK","distance":{"value":40}}]}]}"#),
            Err(LookupError::InvalidResponse(_))
        ));
        assert_eq!(
            parse(r#"{"rows":[{"elements":[{"status":"OK","distance":{"value":60}}]}]}"#).unwrap(),
            0.1
        );
    }

    #[test]
    fn test_silent_endpoint_times_out() {
        // Accepts the connection but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = GoogleDistanceMatrix::new(
            format!("http://{}/distancematrix/json", addr),
            "test-key",
            Duration::from_millis(200),
        );

        let started = Instant::now();
        let lookup = client.lookup("Mumbai", "Pune");
        let elapsed = started.elapsed();

        assert!(matches!(lookup, MatrixLookup::Unavailable { .. }), "{:?}", lookup);
        assert!(elapsed < Duration::from_secs(3), "took {:?}", elapsed);

        let mut resolver = DistanceResolver::with_provider(Box::new(client)).with_seed(5);
        let est = resolver.resolve("Mumbai", "Pune");
        assert_eq!(est.source, DistanceSource::Haversine);
        assert_eq!(est.distance_km, 156.2);
        drop(listener);
    }

    #[test]
    fn test_unreachable_endpoint_is_unavailable() {
        let client = GoogleDistanceMatrix::new(
            "http://127.0.0.1:9/distancematrix/json",
            "test-key",
            Duration::from_millis(500),
        );
        let lookup = client.lookup("Bandra", "Andheri");
        assert!(matches!(lookup, MatrixLookup::Unavailable { .. }));
    }

    #[test]
    fn test_no_key_no_client() {
        let config = ResolverConfig {
            api_key: None,
            ..ResolverConfig::default()
        };
        assert!(GoogleDistanceMatrix::from_config(&config).is_none());
    }
}

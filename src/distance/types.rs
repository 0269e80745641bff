//! Core types for the distance subsystem.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Landmark,
    City,
}

/// A gazetteer entry that matched free-text input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceMatch {
    pub kind: PlaceKind,
    pub key: &'static str,
    pub point: GeoPoint,
    /// City key a landmark belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_city: Option<&'static str>,
    /// State label of a city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
}

impl PlaceMatch {
    pub fn same_place(&self, other: &PlaceMatch) -> bool {
        self.kind == other.kind && self.key == other.key
    }
}

/// Outcome of a live distance-matrix lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatrixLookup {
    Ok { distance_km: f64 },
    Unavailable { reason: String },
}

impl From<Result<f64, LookupError>> for MatrixLookup {
    fn from(result: Result<f64, LookupError>) -> Self {
        match result {
            Ok(distance_km) => Self::Ok { distance_km },
            Err(e) => Self::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

/// Why a live lookup could not produce a distance.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request status {0}")]
    RequestStatus(String),

    #[error("route element status {0}")]
    ElementStatus(String),
}

/// How a distance was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    /// Distance-matrix API.
    Live,
    /// Great-circle distance between gazetteer points times the road factor.
    Haversine,
    /// Two landmarks in the same city.
    IntraCity,
    /// Both inputs matched the same gazetteer entry.
    SamePlace,
    /// At least one input matched nothing.
    Unmatched,
}

impl fmt::Display for DistanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "Live"),
            Self::Haversine => write!(f, "Gazetteer"),
            Self::IntraCity => write!(f, "Intra-city estimate"),
            Self::SamePlace => write!(f, "Minimum-fare estimate"),
            Self::Unmatched => write!(f, "Default estimate"),
        }
    }
}

/// A resolved trip distance with provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceEstimate {
    pub distance_km: f64,
    pub source: DistanceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<PlaceMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PlaceMatch>,
}

impl DistanceEstimate {
    pub(crate) fn bare(distance_km: f64, source: DistanceSource) -> Self {
        Self {
            distance_km,
            source,
            origin: None,
            destination: None,
        }
    }
}

/// Round to one decimal place.
pub(crate) fn round_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

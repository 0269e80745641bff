//! Distance subsystem for the fare estimator.
//!
//! Resolves a road distance between two free-text locations: a live
//! distance-matrix lookup, then a built-in gazetteer of Indian cities and
//! landmarks with haversine geometry.

pub mod gazetteer;
pub mod providers;
pub mod resolver;
pub mod types;

pub use gazetteer::{haversine_km, known_places, match_place, normalize, PlaceInfo};
pub use providers::{DistanceProvider, GoogleDistanceMatrix};
pub use resolver::{DistanceResolver, ROAD_FACTOR};
pub use types::{DistanceEstimate, DistanceSource, GeoPoint, LookupError, MatrixLookup, PlaceKind, PlaceMatch};

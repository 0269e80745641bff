//! Distance resolution pipeline.
//!
//! Flow: live distance matrix → gazetteer match on both sides →
//! same-city landmarks / same place / haversine × road factor →
//! default estimate. Every path yields a distance; nothing is raised.

use super::gazetteer;
use super::providers::{DistanceProvider, GoogleDistanceMatrix};
use super::types::{round_tenth, DistanceEstimate, DistanceSource, MatrixLookup, PlaceKind};
use crate::config::ResolverConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Road distance is this much longer than the great-circle distance.
pub const ROAD_FACTOR: f64 = 1.3;

/// Unmatched input: 10 km plus up to 5.
const UNMATCHED_BASE_KM: u32 = 10;
const UNMATCHED_SPREAD_KM: u32 = 5;

/// Two landmarks in one city: 1 to 15 km.
const INTRA_CITY_SPREAD_KM: u32 = 14;

/// Same place on both sides: 1 to 5 km.
const SAME_PLACE_SPREAD_KM: u32 = 4;

/// The distance resolver with its fallback pipeline.
pub struct DistanceResolver {
    provider: Option<Box<dyn DistanceProvider>>,
    offline: bool,
    rng: StdRng,
}

impl DistanceResolver {
    /// Resolver backed by the Distance Matrix API when `config` has a key.
    pub fn new(config: &ResolverConfig) -> Self {
        let provider = GoogleDistanceMatrix::from_config(config)
            .map(|p| Box::new(p) as Box<dyn DistanceProvider>);
        Self {
            provider,
            offline: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Gazetteer-only resolver.
    pub fn offline() -> Self {
        Self {
            provider: None,
            offline: true,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a resolver with a specific live provider (for testing).
    pub fn with_provider(provider: Box<dyn DistanceProvider>) -> Self {
        Self {
            provider: Some(provider),
            offline: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seed the random offsets used by the estimated branches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Skip the live lookup and answer from the gazetteer only.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn is_live(&self) -> bool {
        !self.offline && self.provider.is_some()
    }

    /// Distance in km between two free-text locations, rounded to 0.1.
    pub fn resolve_distance_km(&mut self, origin: &str, destination: &str) -> f64 {
        self.resolve(origin, destination).distance_km
    }

    /// Resolve a trip distance through the full fallback chain.
    pub fn resolve(&mut self, origin: &str, destination: &str) -> DistanceEstimate {
        // 1. Live lookup
        if let Some(estimate) = self.resolve_live(origin, destination) {
            return estimate;
        }

        // 2. Gazetteer
        let from = gazetteer::match_place(origin);
        let to = gazetteer::match_place(destination);
        debug!(?from, ?to, "Gazetteer matches");

        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (from, to) => {
                warn!(origin, destination, "Could not match locations, using default estimate");
                let km = UNMATCHED_BASE_KM + self.rng.gen_range(0..=UNMATCHED_SPREAD_KM);
                return DistanceEstimate {
                    distance_km: km as f64,
                    source: DistanceSource::Unmatched,
                    origin: from,
                    destination: to,
                };
            }
        };

        // 3. Landmarks in the same city
        let same_city = from.kind == PlaceKind::Landmark
            && to.kind == PlaceKind::Landmark
            && from.parent_city == to.parent_city;
        let (distance_km, source) = if same_city && from.key != to.key {
            let km = 1 + self.rng.gen_range(0..=INTRA_CITY_SPREAD_KM);
            (km as f64, DistanceSource::IntraCity)
        } else if from.same_place(&to) {
            // 4. Same place on both sides
            let km = 1 + self.rng.gen_range(0..=SAME_PLACE_SPREAD_KM);
            (km as f64, DistanceSource::SamePlace)
        } else {
            // 5. Great-circle with road factor
            let km = gazetteer::haversine_km(from.point, to.point) * ROAD_FACTOR;
            (round_tenth(km), DistanceSource::Haversine)
        };

        DistanceEstimate {
            distance_km,
            source,
            origin: Some(from),
            destination: Some(to),
        }
    }

    fn resolve_live(&self, origin: &str, destination: &str) -> Option<DistanceEstimate> {
        if self.offline || origin.trim().is_empty() || destination.trim().is_empty() {
            return None;
        }
        let provider = self.provider.as_ref()?;

        match provider.lookup(origin, destination) {
            MatrixLookup::Ok { distance_km } => {
                debug!(origin, destination, distance_km, "Live distance");
                Some(DistanceEstimate::bare(distance_km, DistanceSource::Live))
            }
            MatrixLookup::Unavailable { reason } => {
                warn!(%reason, "Live distance lookup unavailable, using gazetteer");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedProvider {
        result: MatrixLookup,
        calls: Arc<AtomicUsize>,
    }

    impl DistanceProvider for FixedProvider {
        fn lookup(&self, _origin: &str, _destination: &str) -> MatrixLookup {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn resolver_with(result: MatrixLookup) -> (DistanceResolver, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FixedProvider {
            result,
            calls: Arc::clone(&calls),
        };
        (DistanceResolver::with_provider(Box::new(provider)).with_seed(7), calls)
    }

    fn offline_resolver() -> DistanceResolver {
        DistanceResolver::offline().with_seed(42)
    }

    #[test]
    fn test_live_result_wins() {
        let (mut resolver, calls) = resolver_with(MatrixLookup::Ok { distance_km: 23.4 });
        let est = resolver.resolve("Mumbai", "Pune");
        assert_eq!(est.source, DistanceSource::Live);
        assert_eq!(est.distance_km, 23.4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_live_unavailable_falls_back() {
        let (mut resolver, calls) = resolver_with(MatrixLookup::Unavailable {
            reason: "network error".into(),
        });
        let est = resolver.resolve("Mumbai", "Pune");
        assert_eq!(est.source, DistanceSource::Haversine);
        assert_eq!(est.distance_km, 156.2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_offline_skips_provider() {
        let (mut resolver, calls) = resolver_with(MatrixLookup::Ok { distance_km: 1.0 });
        resolver.set_offline(true);
        assert!(!resolver.is_live());
        let est = resolver.resolve("Mumbai", "Pune");
        assert_eq!(est.source, DistanceSource::Haversine);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_input_skips_provider() {
        let (mut resolver, calls) = resolver_with(MatrixLookup::Ok { distance_km: 1.0 });
        let est = resolver.resolve("  ", "Pune");
        assert_eq!(est.source, DistanceSource::Unmatched);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_intra_city_landmarks() {
        let mut resolver = offline_resolver();
        for _ in 0..50 {
            let est = resolver.resolve("Bandra Station", "BKC Complex");
            assert_eq!(est.source, DistanceSource::IntraCity);
            assert!((1.0..=15.0).contains(&est.distance_km), "{}", est.distance_km);
            assert_eq!(est.distance_km.fract(), 0.0);
        }
    }

    #[test]
    fn test_same_place() {
        let mut resolver = offline_resolver();
        for _ in 0..50 {
            let est = resolver.resolve("Charminar", "near charminar gate");
            assert_eq!(est.source, DistanceSource::SamePlace);
            assert!((1.0..=5.0).contains(&est.distance_km));
        }
        let est = resolver.resolve("Pune", "Pune Junction");
        assert_eq!(est.source, DistanceSource::SamePlace);
    }

    #[test]
    fn test_unmatched_default() {
        let mut resolver = offline_resolver();
        for _ in 0..50 {
            let est = resolver.resolve("Times Square", "Golden Gate Bridge");
            assert_eq!(est.source, DistanceSource::Unmatched);
            assert!((10.0..=15.0).contains(&est.distance_km));
        }
    }

    #[test]
    fn test_one_side_unmatched_keeps_match() {
        let mut resolver = offline_resolver();
        let est = resolver.resolve("Andheri East", "Somewhere unknown");
        assert_eq!(est.source, DistanceSource::Unmatched);
        assert_eq!(est.origin.map(|m| m.key), Some("andheri"));
        assert!(est.destination.is_none());
    }

    #[test]
    fn test_landmarks_in_different_cities_use_haversine() {
        let mut resolver = offline_resolver();
        let est = resolver.resolve("Bandra", "Connaught Place");
        assert_eq!(est.source, DistanceSource::Haversine);
        assert!(est.distance_km > 1400.0);
    }

    #[test]
    fn test_landmark_to_its_city_uses_haversine() {
        let mut resolver = offline_resolver();
        let est = resolver.resolve("Hitec City", "Hyderabad");
        assert_eq!(est.source, DistanceSource::Haversine);
        assert!(est.distance_km > 0.0 && est.distance_km < 20.0);
    }

    #[test]
    fn test_haversine_road_factor() {
        let mut resolver = offline_resolver();
        assert_eq!(resolver.resolve_distance_km("Delhi", "Mumbai"), 1492.5);
        assert_eq!(resolver.resolve_distance_km("Hyderabad", "Secunderabad"), 8.1);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a: Vec<f64> = {
            let mut r = DistanceResolver::offline().with_seed(99);
            (0..10).map(|_| r.resolve_distance_km("xyz", "abc")).collect()
        };
        let b: Vec<f64> = {
            let mut r = DistanceResolver::offline().with_seed(99);
            (0..10).map(|_| r.resolve_distance_km("xyz", "abc")).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_key_means_not_live() {
        let resolver = DistanceResolver::new(&ResolverConfig::default());
        assert!(!resolver.is_live());
    }
}

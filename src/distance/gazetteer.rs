//! Offline gazetteer of Indian cities and landmarks.
//!
//! Used when the live distance lookup is unavailable. Matching is substring
//! containment on normalized text: landmarks first, then cities, earliest
//! table entry wins.

use super::types::{GeoPoint, PlaceKind, PlaceMatch};
use serde::Serialize;

// ─── Built-in dataset ───────────────────────────────────────────

struct GazetteerCity {
    key: &'static str,
    lat: f64,
    lon: f64,
    state: &'static str,
}

struct GazetteerLandmark {
    key: &'static str,
    lat: f64,
    lon: f64,
    /// Key of the city in `CITIES` the landmark lies in.
    city: &'static str,
}

const CITIES: &[GazetteerCity] = &[
    // Metros
    GazetteerCity { key: "mumbai", lat: 19.076, lon: 72.8777, state: "Maharashtra" },
    GazetteerCity { key: "delhi", lat: 28.6139, lon: 77.209, state: "Delhi" },
    GazetteerCity { key: "bangalore", lat: 12.9716, lon: 77.5946, state: "Karnataka" },
    GazetteerCity { key: "hyderabad", lat: 17.385, lon: 78.4867, state: "Telangana" },
    GazetteerCity { key: "secunderabad", lat: 17.4399, lon: 78.4983, state: "Telangana" },
    GazetteerCity { key: "chennai", lat: 13.0827, lon: 80.2707, state: "Tamil Nadu" },
    GazetteerCity { key: "kolkata", lat: 22.5726, lon: 88.3639, state: "West Bengal" },
    GazetteerCity { key: "pune", lat: 18.5204, lon: 73.8567, state: "Maharashtra" },
    GazetteerCity { key: "ahmedabad", lat: 23.0225, lon: 72.5714, state: "Gujarat" },

    // Tier 2
    GazetteerCity { key: "jaipur", lat: 26.9124, lon: 75.7873, state: "Rajasthan" },
    GazetteerCity { key: "lucknow", lat: 26.8467, lon: 80.9462, state: "Uttar Pradesh" },
    GazetteerCity { key: "surat", lat: 21.1702, lon: 72.8311, state: "Gujarat" },
    GazetteerCity { key: "kanpur", lat: 26.4499, lon: 80.3319, state: "Uttar Pradesh" },
    GazetteerCity { key: "nagpur", lat: 21.1458, lon: 79.0882, state: "Maharashtra" },
    GazetteerCity { key: "indore", lat: 22.7196, lon: 75.8577, state: "Madhya Pradesh" },
    GazetteerCity { key: "bhopal", lat: 23.2599, lon: 77.4126, state: "Madhya Pradesh" },
    GazetteerCity { key: "patna", lat: 25.5941, lon: 85.1376, state: "Bihar" },
    GazetteerCity { key: "ludhiana", lat: 30.9000, lon: 75.8573, state: "Punjab" },
    GazetteerCity { key: "agra", lat: 27.1767, lon: 78.0081, state: "Uttar Pradesh" },
    GazetteerCity { key: "nashik", lat: 19.9975, lon: 73.7898, state: "Maharashtra" },
    GazetteerCity { key: "varanasi", lat: 25.3176, lon: 82.9739, state: "Uttar Pradesh" },
    GazetteerCity { key: "amritsar", lat: 31.6340, lon: 74.8723, state: "Punjab" },
    GazetteerCity { key: "ranchi", lat: 23.3441, lon: 85.3096, state: "Jharkhand" },
    GazetteerCity { key: "coimbatore", lat: 11.0168, lon: 76.9558, state: "Tamil Nadu" },
    GazetteerCity { key: "vijayawada", lat: 16.5062, lon: 80.6480, state: "Andhra Pradesh" },
    GazetteerCity { key: "visakhapatnam", lat: 17.6868, lon: 83.2185, state: "Andhra Pradesh" },
    GazetteerCity { key: "madurai", lat: 9.9252, lon: 78.1198, state: "Tamil Nadu" },

    // Other
    GazetteerCity { key: "guwahati", lat: 26.1445, lon: 91.7362, state: "Assam" },
    GazetteerCity { key: "jodhpur", lat: 26.2389, lon: 73.0243, state: "Rajasthan" },
    GazetteerCity { key: "dehradun", lat: 30.3165, lon: 78.0322, state: "Uttarakhand" },
    GazetteerCity { key: "thiruvananthapuram", lat: 8.5241, lon: 76.9366, state: "Kerala" },
    GazetteerCity { key: "kochi", lat: 9.9312, lon: 76.2673, state: "Kerala" },
    GazetteerCity { key: "mangalore", lat: 12.9141, lon: 74.8560, state: "Karnataka" },
    GazetteerCity { key: "mysore", lat: 12.2958, lon: 76.6394, state: "Karnataka" },
    GazetteerCity { key: "chandigarh", lat: 30.7333, lon: 76.7794, state: "Punjab/Haryana" },
    GazetteerCity { key: "jamshedpur", lat: 22.8046, lon: 86.2029, state: "Jharkhand" },
    GazetteerCity { key: "rajkot", lat: 22.3039, lon: 70.8022, state: "Gujarat" },
    GazetteerCity { key: "vadodara", lat: 22.3072, lon: 73.1812, state: "Gujarat" },
    GazetteerCity { key: "noida", lat: 28.5355, lon: 77.3910, state: "Uttar Pradesh" },
    GazetteerCity { key: "gurgaon", lat: 28.4595, lon: 77.0266, state: "Haryana" },
    GazetteerCity { key: "faridabad", lat: 28.4089, lon: 77.3178, state: "Haryana" },
    GazetteerCity { key: "ghaziabad", lat: 28.6692, lon: 77.4538, state: "Uttar Pradesh" },
    GazetteerCity { key: "aurangabad", lat: 19.8762, lon: 75.3433, state: "Maharashtra" },
    GazetteerCity { key: "navi_mumbai", lat: 19.0330, lon: 73.0297, state: "Maharashtra" },
    GazetteerCity { key: "thane", lat: 19.2183, lon: 72.9781, state: "Maharashtra" },
    GazetteerCity { key: "bhubaneswar", lat: 20.2961, lon: 85.8245, state: "Odisha" },
    GazetteerCity { key: "raipur", lat: 21.2514, lon: 81.6296, state: "Chhattisgarh" },
    GazetteerCity { key: "allahabad", lat: 25.4358, lon: 81.8463, state: "Uttar Pradesh" },
    GazetteerCity { key: "goa", lat: 15.2993, lon: 74.1240, state: "Goa" },
    GazetteerCity { key: "pondicherry", lat: 11.9416, lon: 79.8083, state: "Puducherry" },
    GazetteerCity { key: "shimla", lat: 31.1048, lon: 77.1734, state: "Himachal Pradesh" },
    GazetteerCity { key: "srinagar", lat: 34.0837, lon: 74.7973, state: "Jammu & Kashmir" },
];

const LANDMARKS: &[GazetteerLandmark] = &[
    // Delhi NCR
    GazetteerLandmark { key: "connaught_place", lat: 28.6315, lon: 77.2167, city: "delhi" },
    GazetteerLandmark { key: "india_gate", lat: 28.6129, lon: 77.2295, city: "delhi" },
    GazetteerLandmark { key: "airport_delhi", lat: 28.5562, lon: 77.1000, city: "delhi" },

    // Mumbai
    GazetteerLandmark { key: "bandra", lat: 19.0596, lon: 72.8295, city: "mumbai" },
    GazetteerLandmark { key: "andheri", lat: 19.1136, lon: 72.8697, city: "mumbai" },
    GazetteerLandmark { key: "cst_station", lat: 18.9398, lon: 72.8354, city: "mumbai" },
    GazetteerLandmark { key: "airport_mumbai", lat: 19.0896, lon: 72.8656, city: "mumbai" },
    GazetteerLandmark { key: "bkc", lat: 19.0660, lon: 72.8656, city: "mumbai" },

    // Bangalore
    GazetteerLandmark { key: "mg_road", lat: 12.9758, lon: 77.6065, city: "bangalore" },
    GazetteerLandmark { key: "koramangala", lat: 12.9352, lon: 77.6245, city: "bangalore" },
    GazetteerLandmark { key: "indiranagar", lat: 12.9784, lon: 77.6408, city: "bangalore" },
    GazetteerLandmark { key: "airport_bangalore", lat: 13.1989, lon: 77.7068, city: "bangalore" },

    // Hyderabad
    GazetteerLandmark { key: "banjara_hills", lat: 17.4156, lon: 78.4347, city: "hyderabad" },
    GazetteerLandmark { key: "hitec_city", lat: 17.4435, lon: 78.3772, city: "hyderabad" },
    GazetteerLandmark { key: "charminar", lat: 17.3616, lon: 78.4747, city: "hyderabad" },
    GazetteerLandmark { key: "airport_hyderabad", lat: 17.2403, lon: 78.4294, city: "hyderabad" },

    // Chennai
    GazetteerLandmark { key: "t_nagar", lat: 13.0418, lon: 80.2341, city: "chennai" },
    GazetteerLandmark { key: "adyar", lat: 13.0012, lon: 80.2565, city: "chennai" },
    GazetteerLandmark { key: "anna_nagar", lat: 13.0891, lon: 80.2096, city: "chennai" },
    GazetteerLandmark { key: "airport_chennai", lat: 12.9941, lon: 80.1709, city: "chennai" },
];

/// Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

// ─── Matching ───────────────────────────────────────────────────

/// Lowercase, turn every character outside `[a-z0-9]` into a space, collapse
/// runs of spaces and trim.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Table keys use `_` between words.
fn key_pattern(key: &str) -> String {
    normalize(&key.replace('_', " "))
}

fn landmark_match(l: &GazetteerLandmark) -> PlaceMatch {
    PlaceMatch {
        kind: PlaceKind::Landmark,
        key: l.key,
        point: GeoPoint::new(l.lat, l.lon),
        parent_city: Some(l.city),
        state: None,
    }
}

fn city_match(c: &GazetteerCity) -> PlaceMatch {
    PlaceMatch {
        kind: PlaceKind::City,
        key: c.key,
        point: GeoPoint::new(c.lat, c.lon),
        parent_city: None,
        state: Some(c.state),
    }
}

/// Match free text against the gazetteer.
pub fn match_place(input: &str) -> Option<PlaceMatch> {
    let cleaned = normalize(input);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(l) = LANDMARKS.iter().find(|l| cleaned.contains(&key_pattern(l.key))) {
        return Some(landmark_match(l));
    }

    CITIES
        .iter()
        .find(|c| cleaned.contains(&key_pattern(c.key)))
        .map(city_match)
}

/// Great-circle distance in kilometres (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

// ─── Listing ────────────────────────────────────────────────────

/// A gazetteer entry for listing.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceInfo {
    pub name: String,
    pub kind: PlaceKind,
    /// State for cities, parent city key for landmarks.
    pub region: String,
    pub lat: f64,
    pub lon: f64,
}

/// Every gazetteer entry, landmarks first, in match order.
pub fn known_places() -> Vec<PlaceInfo> {
    let landmarks = LANDMARKS.iter().map(|l| PlaceInfo {
        name: key_pattern(l.key),
        kind: PlaceKind::Landmark,
        region: l.city.to_string(),
        lat: l.lat,
        lon: l.lon,
    });
    let cities = CITIES.iter().map(|c| PlaceInfo {
        name: key_pattern(c.key),
        kind: PlaceKind::City,
        region: c.state.to_string(),
        lat: c.lat,
        lon: c.lon,
    });
    landmarks.chain(cities).collect()
}

//! Offline geocoding
//!
//! Records that arrive without coordinates are placed near a known city
//! anchor, perturbed by a stable hash of the address. Same input always gives
//! the same output and nothing leaves the process. Once a coordinate has been
//! derived it is stored on the record and never recomputed.

use crate::types::{round_to, Coordinates};

/// Geocoder trait - abstraction over coordinate lookup
pub trait Geocoder: Send + Sync {
    /// Resolve an address to coordinates
    fn geocode(&self, address: &str, city: &str) -> Coordinates;

    /// Get the name of this geocoder implementation
    fn name(&self) -> &'static str;
}

struct CityAnchor {
    name: &'static str,
    lat: f64,
    lng: f64,
}

const CITY_ANCHORS: &[CityAnchor] = &[
    CityAnchor { name: "wilmington", lat: 39.7459, lng: -75.5466 },
    CityAnchor { name: "newark", lat: 39.6837, lng: -75.7497 },
    CityAnchor { name: "greenville", lat: 39.8043, lng: -75.5974 },
    CityAnchor { name: "rehoboth", lat: 38.7209, lng: -75.0760 },
    CityAnchor { name: "lewes", lat: 38.7743, lng: -75.1393 },
    CityAnchor { name: "dover", lat: 39.1582, lng: -75.5244 },
];

/// Used when the city matches no anchor
const DEFAULT_ANCHOR: Coordinates = Coordinates { lat: 39.7459, lng: -75.5466 };

/// Full span of the latitude perturbation (degrees)
const LAT_SPREAD: f64 = 0.04;
/// Full span of the longitude perturbation (degrees)
const LNG_SPREAD: f64 = 0.05;

/// Polynomial rolling hash (×31, 32-bit wrapping) over UTF-16 code units,
/// returned as an absolute value
fn rolling_hash(value: &str) -> u64 {
    let hash = value
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32));
    (hash as i64).unsigned_abs()
}

fn anchor_for(city: &str) -> Coordinates {
    let city = city.to_lowercase();
    CITY_ANCHORS
        .iter()
        .find(|anchor| city.contains(anchor.name))
        .map(|anchor| Coordinates { lat: anchor.lat, lng: anchor.lng })
        .unwrap_or(DEFAULT_ANCHOR)
}

/// Deterministic coordinate for an address in a city
pub fn derive_coordinates(address: &str, city: &str) -> Coordinates {
    let base = anchor_for(city);
    let seed = rolling_hash(&format!("{}-{}", address, city)) as f64;

    let lat_offset = ((seed % 1000.0) / 1000.0 - 0.5) * LAT_SPREAD;
    let lng_offset = (((seed / 1000.0) % 1000.0) / 1000.0 - 0.5) * LNG_SPREAD;

    Coordinates {
        lat: round_to(base.lat + lat_offset, 6),
        lng: round_to(base.lng + lng_offset, 6),
    }
}

/// Geocoder backed by the city anchor table
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorGeocoder;

impl AnchorGeocoder {
    pub fn new() -> Self {
        Self
    }
}

impl Geocoder for AnchorGeocoder {
    fn geocode(&self, address: &str, city: &str) -> Coordinates {
        derive_coordinates(address, city)
    }

    fn name(&self) -> &'static str {
        "anchor"
    }
}

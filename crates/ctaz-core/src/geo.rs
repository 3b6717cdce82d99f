//! Great-circle math over longitude/latitude points.
//!
//! Everything here is pure. Distances are kilometres on a sphere of radius
//! [`EARTH_RADIUS_KM`]; values shown to users or written into payloads go
//! through [`round_tenth`] so both sides always agree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A longitude/latitude pair. Longitude always comes first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// `[lng, lat]`, the order map libraries and geocoders expect.
    #[must_use]
    pub const fn lng_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Returns `true` when both components are finite and inside WGS84 range.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

/// A named point in the static service-area catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedLocation {
    pub name: &'static str,
    pub coordinates: GeoPoint,
}

/// The catalog entry closest to a point, with its distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestCity {
    pub name: String,
    pub distance_km: f64,
}

/// Everything learned about the user's position in one map session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResolution {
    pub coords: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_to_shop_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_city: Option<NearestCity>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("service-area catalog is empty")]
    EmptyCatalog,
}

/// Haversine distance between two points in kilometres.
///
/// `h` is clamped to 1 before `asin` so antipodal rounding noise never yields NaN.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let s1 = (d_lat / 2.0).sin();
    let s2 = (d_lng / 2.0).sin();
    let h = s1 * s1 + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * s2 * s2;
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Rounds to one decimal place, half away from zero.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Finds the catalog entry closest to `point`.
///
/// Linear scan in catalog order with a strict `<`, so the earliest entry wins
/// an exact tie. The returned distance is unrounded.
///
/// # Errors
///
/// Returns [`GeoError::EmptyCatalog`] if `catalog` has no entries.
pub fn nearest_city(
    point: GeoPoint,
    catalog: &[NamedLocation],
) -> Result<(&NamedLocation, f64), GeoError> {
    let (first, rest) = catalog.split_first().ok_or(GeoError::EmptyCatalog)?;
    let mut best = (first, haversine_km(point, first.coordinates));
    for candidate in rest {
        let d = haversine_km(point, candidate.coordinates);
        if d < best.1 {
            best = (candidate, d);
        }
    }
    Ok(best)
}

/// Distance from `origin` and the nearest catalog city for `point`, both
/// rounded with [`round_tenth`]. The address is left for the caller to fill.
///
/// # Errors
///
/// Returns [`GeoError::EmptyCatalog`] if `catalog` has no entries.
pub fn resolve_point(
    point: GeoPoint,
    origin: GeoPoint,
    catalog: &[NamedLocation],
) -> Result<LocationResolution, GeoError> {
    let (city, distance) = nearest_city(point, catalog)?;
    Ok(LocationResolution {
        coords: point,
        address: None,
        distance_to_shop_km: Some(round_tenth(haversine_km(point, origin))),
        nearest_city: Some(NearestCity {
            name: city.name.to_string(),
            distance_km: round_tenth(distance),
        }),
    })
}

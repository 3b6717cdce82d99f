//! Municipalities covered by the towing service.

use crate::geo::{GeoPoint, NamedLocation};

/// Default map center, also the fallback "shop" when no business is configured.
pub const PHOENIX_CENTER: GeoPoint = GeoPoint::new(-112.074, 33.4484);

const fn area(name: &'static str, longitude: f64, latitude: f64) -> NamedLocation {
    NamedLocation {
        name,
        coordinates: GeoPoint::new(longitude, latitude),
    }
}

/// Service-area catalog in display order. Order matters: nearest-city ties
/// resolve to the earlier entry.
pub const SERVICE_AREAS: &[NamedLocation] = &[
    area("Phoenix", -112.074, 33.448_4),
    area("Mesa", -111.831_5, 33.415_2),
    area("Chandler", -111.841_3, 33.306_2),
    area("Scottsdale", -111.926_1, 33.494_2),
    area("Glendale", -112.185_99, 33.538_7),
    area("Gilbert", -111.789, 33.352_8),
    area("Tempe", -111.94, 33.425_5),
    area("Peoria", -112.237_4, 33.580_6),
    area("Surprise", -112.451, 33.629_2),
    area("Avondale", -112.349_6, 33.435_6),
    area("Goodyear", -112.357_7, 33.435_3),
    area("Buckeye", -112.586_3, 33.370_3),
    area("Queen Creek", -111.634_3, 33.248_7),
    area("Apache Junction", -111.549_6, 33.415),
    area("Paradise Valley", -111.951, 33.531_2),
    area("Fountain Hills", -111.722, 33.604),
    area("El Mirage", -112.324_6, 33.613_1),
    area("Tolleson", -112.255_7, 33.45),
    area("Maricopa", -112.047_6, 33.058_1),
    area("Casa Grande", -111.757_4, 32.879_5),
];

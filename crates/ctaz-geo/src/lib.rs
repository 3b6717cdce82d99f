//! Device location, reverse geocoding and the coverage map controller.

pub mod acquire;
pub mod error;
pub mod geocode;
pub mod map;

pub use acquire::{acquire, AcquisitionPolicy, FallbackTier, PositionOptions, PositionSource};
pub use error::{GeocodeError, LocationError};
pub use geocode::{MapboxGeocoder, NoGeocoder, ReverseGeocoder};
pub use map::{HeadlessBackend, HeadlessSurface, MapBackend, MapState, MapSurface, MapTheme, MapView};

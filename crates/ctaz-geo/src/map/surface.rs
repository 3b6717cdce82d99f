//! Rendering capability the map controller drives.

use std::time::Duration;

use ctaz_core::GeoPoint;

/// Light or dark base layer, following the site theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTheme {
    Light,
    Dark,
}

impl MapTheme {
    #[must_use]
    pub fn style_url(self) -> &'static str {
        match self {
            MapTheme::Light => "mapbox://styles/mapbox/light-v11",
            MapTheme::Dark => "mapbox://styles/mapbox/dark-v11",
        }
    }
}

/// Construction parameters for a map instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub style: &'static str,
    pub center: GeoPoint,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub attribution: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapControl {
    Navigation {
        visualize_pitch: bool,
    },
    Geolocate {
        high_accuracy: bool,
        track_user_location: bool,
        show_accuracy_circle: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    City,
    Business,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Default pin tinted with a CSS color.
    Pin { color: &'static str },
    /// Custom element carrying these CSS classes.
    Element { class: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupContent {
    Text(String),
    /// Pre-escaped HTML.
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub content: PopupContent,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: GeoPoint,
    pub style: MarkerStyle,
    pub popup: Option<Popup>,
}

/// Axis-aligned lng/lat box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl Bounds {
    #[must_use]
    pub fn around(point: GeoPoint) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    #[must_use]
    pub fn extend(self, point: GeoPoint) -> Self {
        Self {
            south_west: GeoPoint::new(
                self.south_west.longitude.min(point.longitude),
                self.south_west.latitude.min(point.latitude),
            ),
            north_east: GeoPoint::new(
                self.north_east.longitude.max(point.longitude),
                self.north_east.latitude.max(point.latitude),
            ),
        }
    }

    #[must_use]
    pub fn contains(self, point: GeoPoint) -> bool {
        (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
            && (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub padding: u32,
    pub max_zoom: f64,
    pub duration: Duration,
}

/// A live map instance. Exclusively owned by [`super::MapView`].
pub trait MapSurface {
    fn add_control(&mut self, control: MapControl);
    fn disable_scroll_zoom(&mut self);
    fn add_marker(&mut self, marker: Marker);
    fn fit_bounds(&mut self, bounds: Bounds, options: FitOptions);
    /// Tears the instance down; the surface is dropped right after.
    fn remove(&mut self);
}

/// Builds map instances into the page's render target.
pub trait MapBackend {
    type Surface: MapSurface;

    fn create(&mut self, options: &MapOptions) -> Self::Surface;
}

//! Coverage map controller.
//!
//! [`MapView`] owns the single map instance and walks it through
//! `Uninitialized → Loading → Ready → Located`. The first usable location
//! event flips a one-shot latch; everything after it is ignored until the
//! view is unmounted.

mod headless;
mod surface;

use std::time::Duration;

use ctaz_core::{
    haversine_km, nearest_city, round_tenth, BusinessLocation, GeoError, GeoPoint,
    LocationResolution, NamedLocation, NearestCity, PHOENIX_CENTER, SERVICE_AREAS,
};

use crate::acquire::{acquire, AcquisitionPolicy, PositionSource};
use crate::geocode::ReverseGeocoder;

pub use headless::{HeadlessBackend, HeadlessSurface};
pub use surface::{
    Bounds, FitOptions, MapBackend, MapControl, MapOptions, MapSurface, MapTheme, Marker,
    MarkerKind, MarkerStyle, Popup, PopupContent,
};

const CITY_MARKER_COLOR: &str = "#E21B5A";
const BUSINESS_MARKER_CLASS: &str =
    "relative h-4 w-4 -translate-y-1 rounded-full bg-primary ring-4 ring-primary/30 shadow-lg";
const USER_MARKER_CLASS: &str =
    "relative h-3 w-3 -translate-y-1 rounded-full bg-blue-600 ring-4 ring-blue-600/30 shadow-md";

const FIT_OPTIONS: FitOptions = FitOptions {
    padding: 48,
    max_zoom: 12.0,
    duration: Duration::from_millis(800),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapState {
    Uninitialized,
    Loading,
    Ready,
    Located,
}

impl std::fmt::Display for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapState::Uninitialized => write!(f, "uninitialized"),
            MapState::Loading => write!(f, "loading"),
            MapState::Ready => write!(f, "ready"),
            MapState::Located => write!(f, "located"),
        }
    }
}

pub struct MapView<B: MapBackend> {
    backend: B,
    geocoder: Box<dyn ReverseGeocoder>,
    business: Option<BusinessLocation>,
    catalog: &'static [NamedLocation],
    state: MapState,
    theme: Option<MapTheme>,
    surface: Option<B::Surface>,
    located: bool,
}

impl<B: MapBackend> MapView<B> {
    /// Creates an unmounted view over the built-in service-area catalog.
    pub fn new(
        backend: B,
        geocoder: Box<dyn ReverseGeocoder>,
        business: Option<BusinessLocation>,
    ) -> Self {
        Self {
            backend,
            geocoder,
            business,
            catalog: SERVICE_AREAS,
            state: MapState::Uninitialized,
            theme: None,
            surface: None,
            located: false,
        }
    }

    /// Replaces the city catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::EmptyCatalog`] for an empty slice.
    pub fn with_catalog(mut self, catalog: &'static [NamedLocation]) -> Result<Self, GeoError> {
        if catalog.is_empty() {
            return Err(GeoError::EmptyCatalog);
        }
        self.catalog = catalog;
        Ok(self)
    }

    #[must_use]
    pub fn state(&self) -> MapState {
        self.state
    }

    #[must_use]
    pub fn surface(&self) -> Option<&B::Surface> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether this session has already produced its location resolution.
    #[must_use]
    pub fn has_located(&self) -> bool {
        self.located
    }

    /// Builds the map into its render target. Mounting an already mounted
    /// view behaves like [`MapView::set_theme`].
    pub fn mount(&mut self, theme: MapTheme) {
        if self.state == MapState::Uninitialized {
            self.build(theme);
        } else {
            self.set_theme(theme);
        }
    }

    /// Rebuilds the map from scratch if `theme` differs from the current one.
    ///
    /// Returns `true` if a rebuild happened. The location latch survives.
    pub fn set_theme(&mut self, theme: MapTheme) -> bool {
        if self.state == MapState::Uninitialized || self.theme == Some(theme) {
            return false;
        }
        self.teardown_surface();
        self.build(theme);
        true
    }

    /// The underlying map finished loading: draw markers, go `Ready`.
    ///
    /// Returns `false` (and does nothing) unless the view is `Loading`.
    pub fn on_load(&mut self) -> bool {
        if self.state != MapState::Loading {
            tracing::debug!(state = %self.state, "ignoring load signal");
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        for city in self.catalog {
            surface.add_marker(Marker {
                kind: MarkerKind::City,
                position: city.coordinates,
                style: MarkerStyle::Pin {
                    color: CITY_MARKER_COLOR,
                },
                popup: Some(Popup {
                    content: PopupContent::Text(city.name.to_string()),
                    offset: 8,
                }),
            });
        }

        if let Some(business) = &self.business {
            surface.add_marker(Marker {
                kind: MarkerKind::Business,
                position: business.coordinates,
                style: MarkerStyle::Element {
                    class: BUSINESS_MARKER_CLASS,
                },
                popup: Some(Popup {
                    content: PopupContent::Html(business_popup_html(business)),
                    offset: 10,
                }),
            });
        }

        self.state = MapState::Ready;
        tracing::debug!(markers = self.catalog.len(), "map ready");
        true
    }

    /// Handles one location event from any source.
    ///
    /// Only the first event after the map is `Ready` is honoured; it places
    /// the user marker, measures distances, looks up an address, fits the
    /// viewport around user and shop, and returns the resolution. Every other
    /// call returns `None` without side effects.
    pub async fn handle_location(&mut self, coords: GeoPoint) -> Option<LocationResolution> {
        if self.located {
            tracing::debug!(%coords, "location already resolved this session, ignoring");
            return None;
        }
        if self.state != MapState::Ready {
            tracing::debug!(%coords, state = %self.state, "map not ready, ignoring location");
            return None;
        }
        self.located = true;

        if let Some(surface) = self.surface.as_mut() {
            surface.add_marker(Marker {
                kind: MarkerKind::User,
                position: coords,
                style: MarkerStyle::Element {
                    class: USER_MARKER_CLASS,
                },
                popup: None,
            });
        }

        let shop = self
            .business
            .as_ref()
            .map_or(PHOENIX_CENTER, |b| b.coordinates);
        let distance_to_shop_km = round_tenth(haversine_km(coords, shop));
        let nearest = nearest_city(coords, self.catalog)
            .ok()
            .map(|(city, distance)| NearestCity {
                name: city.name.to_string(),
                distance_km: round_tenth(distance),
            });

        let address = self.geocoder.reverse_geocode(coords).await;

        if let Some(surface) = self.surface.as_mut() {
            surface.fit_bounds(Bounds::around(coords).extend(shop), FIT_OPTIONS);
        }
        self.state = MapState::Located;

        tracing::info!(
            %coords,
            distance_to_shop_km,
            nearest_city = nearest.as_ref().map(|n| n.name.as_str()),
            has_address = address.is_some(),
            "user located"
        );

        Some(LocationResolution {
            coords,
            address,
            distance_to_shop_km: Some(distance_to_shop_km),
            nearest_city: nearest,
        })
    }

    /// Asks the device for a position and feeds it to [`MapView::handle_location`].
    ///
    /// Acquisition failures are logged and leave the map usable without GPS.
    pub async fn locate_with(&mut self, source: &dyn PositionSource) -> Option<LocationResolution> {
        match acquire(source, &AcquisitionPolicy::map_view()).await {
            Ok(point) => self.handle_location(point).await,
            Err(err) => {
                tracing::info!(error = %err, "proceeding without user location");
                None
            }
        }
    }

    /// Removes the map. A later [`MapView::mount`] starts a fresh session.
    pub fn unmount(&mut self) {
        self.teardown_surface();
        self.state = MapState::Uninitialized;
        self.theme = None;
        self.located = false;
    }

    fn build(&mut self, theme: MapTheme) {
        let options = MapOptions {
            style: theme.style_url(),
            center: PHOENIX_CENTER,
            zoom: 10.0,
            pitch: 0.0,
            bearing: 0.0,
            attribution: true,
        };
        let mut surface = self.backend.create(&options);
        surface.add_control(MapControl::Navigation {
            visualize_pitch: false,
        });
        surface.add_control(MapControl::Geolocate {
            high_accuracy: true,
            track_user_location: false,
            show_accuracy_circle: false,
        });
        surface.disable_scroll_zoom();

        self.surface = Some(surface);
        self.theme = Some(theme);
        self.state = MapState::Loading;
    }

    fn teardown_surface(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.remove();
        }
    }
}

impl<B: MapBackend> Drop for MapView<B> {
    fn drop(&mut self) {
        self.teardown_surface();
    }
}

fn business_popup_html(business: &BusinessLocation) -> String {
    let mut html = format!(
        "<div style=\"font-size:13px;line-height:1.2\"><strong>{}</strong><br/>",
        escape_html(&business.name)
    );
    if let Some(address) = &business.address {
        html.push_str(&escape_html(address));
        html.push_str("<br/>");
    }
    if let Some(phone) = &business.phone {
        match business.tel_href() {
            Some(href) => html.push_str(&format!(
                "<a href=\"{href}\">Call {}</a>",
                escape_html(phone)
            )),
            None => html.push_str(&format!("Call {}", escape_html(phone))),
        }
    }
    html.push_str("</div>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../map_test.rs"]
mod tests;

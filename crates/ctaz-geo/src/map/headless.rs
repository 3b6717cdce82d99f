//! A map backend that renders nothing and remembers everything.
//!
//! Used by the CLI to report what the coverage map would show, and by tests.

use super::surface::{Bounds, FitOptions, MapBackend, MapControl, MapOptions, MapSurface, Marker};

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    builds: usize,
}

impl HeadlessBackend {
    /// How many map instances have been constructed.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds
    }
}

impl MapBackend for HeadlessBackend {
    type Surface = HeadlessSurface;

    fn create(&mut self, options: &MapOptions) -> HeadlessSurface {
        self.builds += 1;
        tracing::debug!(style = options.style, build = self.builds, "creating headless map");
        HeadlessSurface {
            options: options.clone(),
            controls: Vec::new(),
            markers: Vec::new(),
            viewport: None,
            scroll_zoom: true,
            removed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub options: MapOptions,
    pub controls: Vec<MapControl>,
    pub markers: Vec<Marker>,
    pub viewport: Option<(Bounds, FitOptions)>,
    pub scroll_zoom: bool,
    pub removed: bool,
}

impl MapSurface for HeadlessSurface {
    fn add_control(&mut self, control: MapControl) {
        self.controls.push(control);
    }

    fn disable_scroll_zoom(&mut self) {
        self.scroll_zoom = false;
    }

    fn add_marker(&mut self, marker: Marker) {
        tracing::trace!(kind = ?marker.kind, position = %marker.position, "marker added");
        self.markers.push(marker);
    }

    fn fit_bounds(&mut self, bounds: Bounds, options: FitOptions) {
        self.viewport = Some((bounds, options));
    }

    fn remove(&mut self) {
        self.removed = true;
    }
}

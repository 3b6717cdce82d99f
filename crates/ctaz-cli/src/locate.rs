//! `nearest` and `locate` handlers.

use async_trait::async_trait;
use ctaz_core::{AppConfig, BusinessLocation, GeoPoint, PHOENIX_CENTER, SERVICE_AREAS};
use ctaz_geo::{
    HeadlessBackend, LocationError, MapTheme, MapView, MapboxGeocoder, NoGeocoder,
    PositionOptions, PositionSource, ReverseGeocoder,
};

use crate::PointArgs;

/// Position source that always reports the coordinate given on the command line.
pub(crate) struct FixedPosition(pub GeoPoint);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<GeoPoint, LocationError> {
        Ok(self.0)
    }
}

fn parse_point(args: PointArgs) -> anyhow::Result<GeoPoint> {
    let point = GeoPoint::new(args.longitude, args.latitude);
    if !point.is_valid() {
        anyhow::bail!(
            "coordinates out of range: {point} (expected --longitude in [-180, 180] and --latitude in [-90, 90])"
        );
    }
    Ok(point)
}

fn load_business(config: &AppConfig) -> anyhow::Result<Option<BusinessLocation>> {
    let business = ctaz_core::load_business_if_present(&config.business_path)?;
    if business.is_none() {
        tracing::warn!(
            path = %config.business_path.display(),
            "no business location file; measuring from the Phoenix map center"
        );
    }
    Ok(business)
}

pub(crate) fn build_geocoder(config: &AppConfig) -> anyhow::Result<Box<dyn ReverseGeocoder>> {
    match config.mapbox_access_token.as_deref() {
        Some(token) => Ok(Box::new(MapboxGeocoder::with_base_url(
            token,
            config.http_timeout_secs,
            &config.user_agent,
            &config.geocoder_base_url,
        )?)),
        None => {
            tracing::info!("MAPBOX_ACCESS_TOKEN not set; reverse geocoding disabled");
            Ok(Box::new(NoGeocoder))
        }
    }
}

/// Prints the nearest service-area city and distance to the shop as JSON.
pub(crate) fn run_nearest(config: &AppConfig, args: PointArgs) -> anyhow::Result<()> {
    let point = parse_point(args)?;
    let origin = load_business(config)?.map_or(PHOENIX_CENTER, |b| b.coordinates);
    let resolution = ctaz_core::resolve_point(point, origin, SERVICE_AREAS)?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

/// Mounts a headless coverage map, feeds it the given position, and prints
/// the resolution plus what the map ended up showing.
pub(crate) async fn run_locate(
    config: &AppConfig,
    args: PointArgs,
    theme: MapTheme,
) -> anyhow::Result<()> {
    let point = parse_point(args)?;
    let business = load_business(config)?;
    let geocoder = build_geocoder(config)?;

    let mut view = MapView::new(HeadlessBackend::default(), geocoder, business);
    view.mount(theme);
    view.on_load();

    let resolution = view
        .locate_with(&FixedPosition(point))
        .await
        .ok_or_else(|| anyhow::anyhow!("map did not resolve the location"))?;

    let markers = view.surface().map_or(0, |s| s.markers.len());
    tracing::info!(state = %view.state(), markers, theme = ?theme, "headless map finished");

    println!("{}", serde_json::to_string_pretty(&resolution)?);
    view.unmount();
    Ok(())
}

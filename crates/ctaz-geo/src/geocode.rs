//! Reverse geocoding against the Mapbox Places API.
//!
//! The map only ever wants a best-effort label for the user's position, so
//! [`ReverseGeocoder`] returns `Option<String>` and swallows every failure.
//! [`MapboxGeocoder::lookup`] keeps the typed error for callers that care.

use std::time::Duration;

use async_trait::async_trait;
use ctaz_core::GeoPoint;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::GeocodeError;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Coordinate → human-readable address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Place name for `point`, or `None` if unavailable for any reason.
    async fn reverse_geocode(&self, point: GeoPoint) -> Option<String>;
}

/// Geocoder used when no access token is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

#[async_trait]
impl ReverseGeocoder for NoGeocoder {
    async fn reverse_geocode(&self, _point: GeoPoint) -> Option<String> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Debug, Deserialize)]
struct PlaceFeature {
    place_name: Option<String>,
}

/// Client for `GET /geocoding/v5/mapbox.places/{lng},{lat}.json`.
///
/// Use [`MapboxGeocoder::new`] for production or
/// [`MapboxGeocoder::with_base_url`] to point at a mock server in tests.
pub struct MapboxGeocoder {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl MapboxGeocoder {
    /// Creates a geocoder pointed at the production Mapbox API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the client cannot be built, or
    /// [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Looks up the first place name for `point`.
    ///
    /// `Ok(None)` means the service answered but had no named feature.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected JSON.
    pub async fn lookup(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        let url = self.places_url(point)?;
        // The access token rides in the query string; keep it out of errors.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let places: PlacesResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("mapbox.places({point})"),
                source: e,
            })?;

        Ok(places
            .features
            .into_iter()
            .next()
            .and_then(|f| f.place_name)
            .filter(|name| !name.trim().is_empty()))
    }

    fn places_url(&self, point: GeoPoint) -> Result<Url, GeocodeError> {
        let [lng, lat] = point.lng_lat();
        let mut url = self
            .base_url
            .join(&format!("geocoding/v5/mapbox.places/{lng},{lat}.json"))
            .map_err(|_| GeocodeError::InvalidBaseUrl(self.base_url.to_string()))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }
}

#[async_trait]
impl ReverseGeocoder for MapboxGeocoder {
    async fn reverse_geocode(&self, point: GeoPoint) -> Option<String> {
        match self.lookup(point).await {
            Ok(Some(name)) => Some(name),
            Ok(None) => {
                tracing::debug!(%point, "reverse geocoding returned no features");
                None
            }
            Err(e) => {
                tracing::warn!(%point, error = %e, "reverse geocoding failed");
                None
            }
        }
    }
}

//! Wire types for `POST /api/quote`.

use ctaz_core::{DiscountInfo, GeoPoint};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::validate_submission;
use crate::ValidationError;

const SHARED_LOCATION_ACCURACY: &str = "GPS coordinates shared by customer";

/// Google Maps link for a shared position, `?q=lat,lng`.
#[must_use]
pub fn map_link(point: GeoPoint) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        point.latitude, point.longitude
    )
}

/// Vehicle section of the towing calculator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleInfo {
    pub year: String,
    pub make: String,
    pub model: String,
    pub plate: String,
    pub registration_state: String,
    pub is_large: bool,
}

/// What the cost calculator hands to the quote form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDetails {
    pub service: String,
    pub from_address: String,
    pub to_address: String,
    /// Distance as entered or calculated; empty until "Calculate" runs.
    pub miles: String,
    pub vehicle: VehicleInfo,
    pub discounts: DiscountInfo,
    pub estimated_total: Decimal,
}

/// Exact position the customer chose to attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFragment {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(alias = "googleMapsLink")]
    pub map_link: String,
    pub accuracy: String,
}

impl From<GeoPoint> for LocationFragment {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
            map_link: map_link(point),
            accuracy: SHARED_LOCATION_ACCURACY.to_owned(),
        }
    }
}

/// Body of `POST /api/quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub miles: String,

    #[serde(default)]
    pub vehicle_year: String,
    #[serde(default)]
    pub vehicle_make: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub vehicle_plate: String,
    #[serde(default)]
    pub vehicle_registration_state: String,
    #[serde(default)]
    pub is_large_vehicle: bool,

    #[serde(flatten)]
    pub discounts: DiscountInfo,

    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_total: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationFragment>,
}

impl QuoteRequest {
    /// Assembles a payload from the form's contact fields and the trip.
    ///
    /// Text is trimmed; blank email and message are dropped.
    #[must_use]
    pub fn build(
        name: &str,
        phone: &str,
        email: &str,
        message: &str,
        trip: &TripDetails,
        shared: Option<GeoPoint>,
    ) -> Self {
        Self {
            customer_name: name.trim().to_owned(),
            customer_phone: phone.trim().to_owned(),
            customer_email: non_blank(email),
            message: non_blank(message),
            service: trip.service.trim().to_owned(),
            from_address: trip.from_address.trim().to_owned(),
            to_address: trip.to_address.trim().to_owned(),
            miles: trip.miles.trim().to_owned(),
            vehicle_year: trip.vehicle.year.trim().to_owned(),
            vehicle_make: trip.vehicle.make.trim().to_owned(),
            vehicle_model: trip.vehicle.model.trim().to_owned(),
            vehicle_plate: trip.vehicle.plate.trim().to_owned(),
            vehicle_registration_state: trip.vehicle.registration_state.trim().to_owned(),
            is_large_vehicle: trip.vehicle.is_large,
            discounts: trip.discounts,
            estimated_total: trip.estimated_total,
            location: shared.map(LocationFragment::from),
        }
    }

    /// Server-side counterpart of the form checks.
    ///
    /// # Errors
    ///
    /// See [`validate_submission`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_submission(&self.customer_name, &self.customer_phone, &self.miles)
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Body returned by `POST /api/quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QuoteResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ctaz_core::{DiscountInfo, GeoPoint};
use ctaz_geo::{LocationError, PositionOptions, PositionSource};
use rust_decimal::Decimal;

use super::*;
use crate::error::QuoteClientError;
use crate::request::{QuoteResponse, VehicleInfo};

/// Records every request and replays a fixed reply.
struct RecordingSubmitter {
    reply: fn() -> Result<QuoteResponse, QuoteClientError>,
    sent: Mutex<Vec<QuoteRequest>>,
}

impl RecordingSubmitter {
    fn replying(reply: fn() -> Result<QuoteResponse, QuoteClientError>) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<QuoteRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSubmitter for RecordingSubmitter {
    async fn submit(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteClientError> {
        self.sent.lock().unwrap().push(request.clone());
        (self.reply)()
    }
}

/// Answers each call with the next scripted result.
struct ScriptedSource(Mutex<VecDeque<Result<GeoPoint, LocationError>>>);

impl ScriptedSource {
    fn new(script: impl IntoIterator<Item = Result<GeoPoint, LocationError>>) -> Self {
        Self(Mutex::new(script.into_iter().collect()))
    }
}

#[async_trait]
impl PositionSource for ScriptedSource {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<GeoPoint, LocationError> {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LocationError::PositionUnavailable))
    }
}

fn trip(miles: &str) -> TripDetails {
    TripDetails {
        service: "towing".to_owned(),
        from_address: "Tempe, AZ".to_owned(),
        to_address: "Peoria, AZ".to_owned(),
        miles: miles.to_owned(),
        vehicle: VehicleInfo {
            year: "2020".to_owned(),
            make: "Toyota".to_owned(),
            model: "Camry".to_owned(),
            plate: "ABC1234".to_owned(),
            registration_state: "AZ".to_owned(),
            is_large: false,
        },
        discounts: DiscountInfo::default(),
        estimated_total: Decimal::new(12450, 2),
    }
}

fn jane() -> QuoteForm {
    let mut form = QuoteForm::new();
    form.customer_name = "Jane Doe".to_owned();
    form.customer_phone = "555-1234".to_owned();
    form
}

fn accepted() -> Result<QuoteResponse, QuoteClientError> {
    Ok(QuoteResponse::ok())
}

#[tokio::test]
async fn missing_contact_info_sends_nothing() {
    let submitter = RecordingSubmitter::replying(accepted);
    let mut form = QuoteForm::new();
    form.customer_name = "   ".to_owned();
    form.customer_phone = "555-1234".to_owned();

    form.submit(&trip("12.3"), &submitter).await;

    assert_eq!(form.error(), Some("Please enter your name and phone number."));
    assert!(submitter.sent().is_empty());
}

#[tokio::test]
async fn zero_or_absent_miles_sends_nothing() {
    let submitter = RecordingSubmitter::replying(accepted);
    let mut form = jane();

    for miles in ["", "0", "abc"] {
        form.submit(&trip(miles), &submitter).await;
        assert_eq!(
            form.error(),
            Some("Please calculate the distance first using the 'Calculate' button."),
            "{miles:?}"
        );
    }
    assert!(submitter.sent().is_empty());
    assert!(!form.can_submit(&trip("")));
    assert!(form.can_submit(&trip("12.3")));
}

#[tokio::test]
async fn successful_submission_sends_trimmed_payload_and_clears_fields() {
    let submitter = RecordingSubmitter::replying(accepted);
    let mut form = QuoteForm::new();
    form.customer_name = " Jane Doe ".to_owned();
    form.customer_phone = "555-1234".to_owned();
    form.customer_email = "  ".to_owned();

    let state = form.submit(&trip("12.3"), &submitter).await;
    assert_eq!(*state, FormState::Success);

    let sent = submitter.sent();
    assert_eq!(sent.len(), 1);
    let request = &sent[0];
    assert_eq!(request.customer_name, "Jane Doe");
    assert_eq!(request.customer_phone, "555-1234");
    assert_eq!(request.customer_email, None);
    assert_eq!(request.message, None);
    assert_eq!(request.miles, "12.3");
    assert_eq!(request.vehicle_plate, "ABC1234");
    assert_eq!(request.estimated_total, Decimal::new(12450, 2));
    assert!(request.location.is_none());

    assert!(form.customer_name.is_empty());
    assert!(form.customer_phone.is_empty());
    assert!(form.customer_email.is_empty());
    assert!(form.message.is_empty());
    assert!(form.shared_location().is_none());
    assert!(!form.can_submit(&trip("12.3")));
}

#[tokio::test]
async fn success_state_ignores_further_submits_until_closed() {
    let submitter = RecordingSubmitter::replying(accepted);
    let mut form = jane();
    form.submit(&trip("12.3"), &submitter).await;

    form.customer_name = "Jane Doe".to_owned();
    form.customer_phone = "555-1234".to_owned();
    form.submit(&trip("12.3"), &submitter).await;
    assert_eq!(submitter.sent().len(), 1);

    form.close();
    assert_eq!(*form.state(), FormState::Editing { error: None });
    assert!(form.customer_name.is_empty());
}

#[tokio::test]
async fn server_rejection_shows_server_message() {
    let submitter = RecordingSubmitter::replying(|| {
        Ok(QuoteResponse::rejected("We do not tow to that address."))
    });
    let mut form = jane();

    form.submit(&trip("12.3"), &submitter).await;

    assert_eq!(form.error(), Some("We do not tow to that address."));
    assert_eq!(form.customer_name, "Jane Doe");
    assert!(form.can_submit(&trip("12.3")));
}

#[tokio::test]
async fn server_rejection_without_message_uses_default() {
    let submitter = RecordingSubmitter::replying(|| {
        Ok(QuoteResponse {
            success: false,
            message: None,
        })
    });
    let mut form = jane();

    form.submit(&trip("12.3"), &submitter).await;

    assert_eq!(form.error(), Some("Failed to submit quote request"));
}

#[tokio::test]
async fn transport_failure_keeps_fields_for_retry() {
    let submitter = RecordingSubmitter::replying(|| {
        Err(QuoteClientError::UnexpectedStatus {
            status: 502,
            url: "http://localhost:3000/api/quote".to_owned(),
        })
    });
    let mut form = jane();

    form.submit(&trip("12.3"), &submitter).await;

    assert_eq!(
        form.error(),
        Some("Failed to submit quote request. Please try again.")
    );
    assert_eq!(form.customer_phone, "555-1234");
}

#[tokio::test]
async fn shared_location_is_appended_and_sent() {
    let submitter = RecordingSubmitter::replying(accepted);
    let source = ScriptedSource::new([Ok(GeoPoint::new(-112.0, 33.45))]);
    let mut form = jane();
    form.message = "Car is in the parking garage".to_owned();

    let shared = form.share_location(&source).await;

    assert_eq!(shared, Some(GeoPoint::new(-112.0, 33.45)));
    assert_eq!(
        form.message,
        "Car is in the parking garage\n\n📍 My exact location: https://maps.google.com/?q=33.45,-112"
    );

    form.submit(&trip("12.3"), &submitter).await;
    let location = submitter.sent()[0].location.clone().unwrap();
    assert_eq!(location.latitude, 33.45);
    assert_eq!(location.map_link, "https://maps.google.com/?q=33.45,-112");
}

#[tokio::test]
async fn shared_location_into_empty_message_has_no_separator() {
    let source = ScriptedSource::new([Ok(GeoPoint::new(-112.0, 33.45))]);
    let mut form = QuoteForm::new();

    form.share_location(&source).await;

    assert_eq!(
        form.message,
        "📍 My exact location: https://maps.google.com/?q=33.45,-112"
    );
}

#[tokio::test]
async fn share_location_falls_back_after_unavailable() {
    let source = ScriptedSource::new([
        Err(LocationError::PositionUnavailable),
        Ok(GeoPoint::new(-111.94, 33.4255)),
    ]);
    let mut form = QuoteForm::new();

    assert!(form.share_location(&source).await.is_some());
    assert!(form.location_error().is_none());
}

#[tokio::test]
async fn denied_location_sets_message_but_allows_submit() {
    let submitter = RecordingSubmitter::replying(accepted);
    let source = ScriptedSource::new([Err(LocationError::PermissionDenied)]);
    let mut form = jane();

    assert!(form.share_location(&source).await.is_none());
    assert_eq!(
        form.location_error(),
        Some("Location access denied. Please enable location permissions and try again.")
    );
    assert!(form.message.is_empty());

    form.submit(&trip("12.3"), &submitter).await;
    assert_eq!(*form.state(), FormState::Success);
    assert!(submitter.sent()[0].location.is_none());
}

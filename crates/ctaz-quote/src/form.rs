//! Enhanced quote form: contact details, optional exact location, and a
//! single submission per click.

use std::fmt;

use ctaz_core::GeoPoint;
use ctaz_geo::{acquire, AcquisitionPolicy, PositionSource};

use crate::client::QuoteSubmitter;
use crate::request::{map_link, QuoteRequest, TripDetails};
use crate::validation::{parse_miles, validate_submission};

const SERVER_REJECTED: &str = "Failed to submit quote request";
const TRANSPORT_FAILED: &str = "Failed to submit quote request. Please try again.";

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Fields are editable. `error` is the banner above the submit button.
    Editing { error: Option<String> },
    /// A request is in flight; the submit button is disabled.
    Submitting,
    /// The backend accepted the quote; the confirmation dialog is showing.
    Success,
}

impl Default for FormState {
    fn default() -> Self {
        Self::Editing { error: None }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing { .. } => f.write_str("editing"),
            Self::Submitting => f.write_str("submitting"),
            Self::Success => f.write_str("success"),
        }
    }
}

/// Controller behind the quote dialog.
///
/// Contact fields are public so a UI layer can bind them directly; the
/// submit cycle and shared location only change through methods.
#[derive(Debug, Default)]
pub struct QuoteForm {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub message: String,
    state: FormState,
    shared_location: Option<GeoPoint>,
    location_error: Option<String>,
}

impl QuoteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Current error banner, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Editing { error } => error.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn shared_location(&self) -> Option<GeoPoint> {
        self.shared_location
    }

    #[must_use]
    pub fn location_error(&self) -> Option<&str> {
        self.location_error.as_deref()
    }

    /// Mirrors the submit button: enabled while editing once a distance exists.
    #[must_use]
    pub fn can_submit(&self, trip: &TripDetails) -> bool {
        matches!(self.state, FormState::Editing { .. }) && parse_miles(&trip.miles).is_some()
    }

    /// Payload the next submission would send.
    #[must_use]
    pub fn build_request(&self, trip: &TripDetails) -> QuoteRequest {
        QuoteRequest::build(
            &self.customer_name,
            &self.customer_phone,
            &self.customer_email,
            &self.message,
            trip,
            self.shared_location,
        )
    }

    /// Validates, sends exactly one request, and moves to the resulting state.
    ///
    /// Nothing is sent when validation fails. Calls made outside `Editing`
    /// are ignored.
    pub async fn submit(
        &mut self,
        trip: &TripDetails,
        submitter: &dyn QuoteSubmitter,
    ) -> &FormState {
        if !matches!(self.state, FormState::Editing { .. }) {
            tracing::debug!(state = %self.state, "submit ignored");
            return &self.state;
        }

        if let Err(err) =
            validate_submission(&self.customer_name, &self.customer_phone, &trip.miles)
        {
            self.state = FormState::Editing {
                error: Some(err.to_string()),
            };
            return &self.state;
        }

        let request = self.build_request(trip);
        self.state = FormState::Submitting;

        let next = match submitter.submit(&request).await {
            Ok(response) if response.success => {
                tracing::info!(
                    service = %request.service,
                    miles = %request.miles,
                    "quote submitted"
                );
                self.clear_fields();
                FormState::Success
            }
            Ok(response) => {
                tracing::warn!(message = ?response.message, "quote rejected by server");
                FormState::Editing {
                    error: Some(
                        response
                            .message
                            .filter(|m| !m.trim().is_empty())
                            .unwrap_or_else(|| SERVER_REJECTED.to_owned()),
                    ),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "quote submission failed");
                FormState::Editing {
                    error: Some(TRANSPORT_FAILED.to_owned()),
                }
            }
        };
        self.state = next;
        &self.state
    }

    /// Attaches the customer's exact position to the quote.
    ///
    /// On success the Google Maps link is appended to the message. On failure
    /// only [`QuoteForm::location_error`] is set; submission stays possible.
    pub async fn share_location(&mut self, source: &dyn PositionSource) -> Option<GeoPoint> {
        self.location_error = None;
        match acquire(source, &AcquisitionPolicy::share_location()).await {
            Ok(point) => {
                let line = format!("📍 My exact location: {}", map_link(point));
                if self.message.trim().is_empty() {
                    self.message = line;
                } else {
                    self.message = format!("{}\n\n{line}", self.message);
                }
                self.shared_location = Some(point);
                Some(point)
            }
            Err(err) => {
                self.location_error = Some(err.user_message().to_owned());
                None
            }
        }
    }

    /// Dismisses the dialog: every field and the submit state start over.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    fn clear_fields(&mut self) {
        self.customer_name.clear();
        self.customer_phone.clear();
        self.customer_email.clear();
        self.message.clear();
        self.shared_location = None;
        self.location_error = None;
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

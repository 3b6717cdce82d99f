//! Quote requests: payload types, validation, the enhanced quote form, and
//! the `/api/quote` HTTP client.

pub mod client;
pub mod error;
pub mod form;
pub mod request;
pub mod validation;

pub use client::{HttpQuoteClient, QuoteSubmitter};
pub use error::{QuoteClientError, ValidationError};
pub use form::{FormState, QuoteForm};
pub use request::{LocationFragment, QuoteRequest, QuoteResponse, TripDetails, VehicleInfo};
pub use validation::{parse_miles, validate_submission};

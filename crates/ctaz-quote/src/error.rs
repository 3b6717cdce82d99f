use thiserror::Error;

/// Why a quote was not sent. `Display` is the text shown on the form.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name and phone number.")]
    MissingContactInfo,

    #[error("Please calculate the distance first using the 'Calculate' button.")]
    DistanceNotCalculated,
}

/// Errors from the quote submission client.
#[derive(Debug, Error)]
pub enum QuoteClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid quote endpoint base URL '{0}'")]
    InvalidBaseUrl(String),
}

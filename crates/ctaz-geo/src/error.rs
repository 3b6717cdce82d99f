use thiserror::Error;

/// Why a device position could not be obtained.
///
/// The first three mirror the W3C `GeolocationPositionError` codes.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("geolocation is not supported on this platform")]
    Unsupported,
}

impl LocationError {
    /// Maps a W3C `GeolocationPositionError.code` (1, 2, 3).
    #[must_use]
    pub fn from_position_error_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    /// Text shown to the customer next to the "Share My Location" button.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access denied. Please enable location permissions and try again."
            }
            Self::PositionUnavailable => "Location unavailable. Please try again.",
            Self::Timeout => "Location request timed out. Please try again.",
            Self::Unsupported => "Geolocation is not supported by your browser.",
        }
    }
}

/// Errors from the reverse-geocoding HTTP client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL '{0}'")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_error_codes_map_to_taxonomy() {
        assert_eq!(
            LocationError::from_position_error_code(1),
            Some(LocationError::PermissionDenied)
        );
        assert_eq!(
            LocationError::from_position_error_code(2),
            Some(LocationError::PositionUnavailable)
        );
        assert_eq!(
            LocationError::from_position_error_code(3),
            Some(LocationError::Timeout)
        );
        assert_eq!(LocationError::from_position_error_code(0), None);
    }

    #[test]
    fn every_kind_has_a_distinct_message() {
        let kinds = [
            LocationError::PermissionDenied,
            LocationError::PositionUnavailable,
            LocationError::Timeout,
            LocationError::Unsupported,
        ];
        let mut messages: Vec<_> = kinds.iter().map(|k| k.user_message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }
}

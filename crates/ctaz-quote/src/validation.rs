use crate::error::ValidationError;

/// Parses the calculator's distance field. Only finite, positive mileage counts.
#[must_use]
pub fn parse_miles(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|miles| miles.is_finite() && *miles > 0.0)
}

/// Checks a submission in the order the form reports problems:
/// contact details first, then the calculated distance.
///
/// # Errors
///
/// - [`ValidationError::MissingContactInfo`] if name or phone is blank.
/// - [`ValidationError::DistanceNotCalculated`] if `miles` is not a positive number.
pub fn validate_submission(name: &str, phone: &str, miles: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || phone.trim().is_empty() {
        return Err(ValidationError::MissingContactInfo);
    }
    if parse_miles(miles).is_none() {
        return Err(ValidationError::DistanceNotCalculated);
    }
    Ok(())
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::ConfigError;

/// The shop itself: where trucks are dispatched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessLocation {
    pub name: String,
    pub coordinates: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl BusinessLocation {
    /// `tel:` link for the configured phone number, keeping only digits and `+`.
    ///
    /// Returns `None` when no phone is configured or nothing dialable remains.
    #[must_use]
    pub fn tel_href(&self) -> Option<String> {
        let dialable: String = self
            .phone
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        (!dialable.is_empty()).then(|| format!("tel:{dialable}"))
    }
}

#[derive(Debug, Deserialize)]
pub struct BusinessFile {
    pub business: BusinessLocation,
}

/// Load and validate the business location from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_business(path: &Path) -> Result<BusinessLocation, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BusinessFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_business(&content)
}

/// Like [`load_business`], but a missing file means "no business configured".
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or validated.
pub fn load_business_if_present(path: &Path) -> Result<Option<BusinessLocation>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    load_business(path).map(Some)
}

fn parse_business(content: &str) -> Result<BusinessLocation, ConfigError> {
    let file: BusinessFile = serde_yaml::from_str(content)?;
    validate_business(&file.business)?;
    Ok(file.business)
}

fn validate_business(business: &BusinessLocation) -> Result<(), ConfigError> {
    if business.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "business name must be non-empty".to_string(),
        ));
    }

    if !business.coordinates.is_valid() {
        return Err(ConfigError::Validation(format!(
            "business '{}' has out-of-range coordinates {}",
            business.name, business.coordinates
        )));
    }

    Ok(())
}

pub mod app_config;
pub mod business;
pub mod config;
pub mod discount;
pub mod geo;
pub mod service_area;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use business::{load_business, load_business_if_present, BusinessFile, BusinessLocation};
pub use config::{load_app_config, load_app_config_from_env};
pub use discount::{Discount, DiscountInfo};
pub use geo::{
    haversine_km, nearest_city, resolve_point, round_tenth, GeoError, GeoPoint,
    LocationResolution, NamedLocation, NearestCity,
};
pub use service_area::{PHOENIX_CENTER, SERVICE_AREAS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read business file {path}: {source}")]
    BusinessFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse business file: {0}")]
    BusinessFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}

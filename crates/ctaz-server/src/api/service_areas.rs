use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use ctaz_core::{
    resolve_point, BusinessLocation, GeoPoint, LocationResolution, NamedLocation, PHOENIX_CENTER,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ServiceAreasData {
    pub center: GeoPoint,
    pub business: Option<BusinessLocation>,
    pub service_areas: &'static [NamedLocation],
}

#[derive(Debug, Deserialize)]
pub(super) struct NearestQuery {
    pub longitude: f64,
    pub latitude: f64,
}

pub(super) async fn list_service_areas(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ServiceAreasData>> {
    Json(ApiResponse {
        data: ServiceAreasData {
            center: PHOENIX_CENTER,
            business: state.business.as_deref().cloned(),
            service_areas: state.catalog,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Distance to the shop and nearest catalog city for a point.
///
/// Without a configured business the distance is measured from the Phoenix
/// map center.
pub(super) async fn nearest_service_area(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<LocationResolution>>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    let point = GeoPoint::new(params.longitude, params.latitude);
    if !point.is_valid() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("coordinates out of range: {point}"),
        ));
    }

    let origin = state
        .business
        .as_ref()
        .map_or(PHOENIX_CENTER, |b| b.coordinates);
    let resolution = resolve_point(point, origin, state.catalog).map_err(|e| {
        tracing::error!(error = %e, "nearest city lookup failed");
        ApiError::new(req_id.0.clone(), "internal_error", e.to_string())
    })?;

    Ok(Json(ApiResponse {
        data: resolution,
        meta: ResponseMeta::new(req_id.0),
    }))
}

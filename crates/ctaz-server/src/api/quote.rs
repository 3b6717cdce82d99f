use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use ctaz_quote::{QuoteRequest, QuoteResponse};

use crate::middleware::RequestId;

/// `POST /api/quote`. Answers with the `{success, message}` contract the
/// quote form expects rather than the `/api/v1` envelope.
pub(super) async fn submit_quote(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(
                request_id = %req_id.0,
                error = %rejection.body_text(),
                "malformed quote request"
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(QuoteResponse::rejected("Invalid quote request.")),
            )
                .into_response();
        }
    };

    if let Err(err) = request.validate() {
        tracing::info!(request_id = %req_id.0, reason = %err, "quote request rejected");
        return (
            StatusCode::BAD_REQUEST,
            Json(QuoteResponse::rejected(err.to_string())),
        )
            .into_response();
    }

    tracing::info!(
        request_id = %req_id.0,
        service = %request.service,
        miles = %request.miles,
        estimated_total = %request.estimated_total,
        has_email = request.customer_email.is_some(),
        shared_location = request.location.is_some(),
        "quote request received"
    );

    (StatusCode::OK, Json(QuoteResponse::ok())).into_response()
}

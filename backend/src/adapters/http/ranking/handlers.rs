//! HTTP handlers for ranking endpoints.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::{SubmitRankingCommand, SubmitRankingError, SubmitRankingHandler};
use crate::domain::foundation::ValidationError;

use super::dto::{ErrorResponse, HealthResponse, SubmitResponse};

/// Header carrying the request correlation id.
const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RankingAppState {
    submit_handler: Arc<SubmitRankingHandler>,
}

impl RankingAppState {
    pub fn new(submit_handler: Arc<SubmitRankingHandler>) -> Self {
        Self { submit_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// POST /submit - Rank an uploaded table and email the result
///
/// Multipart fields: `file`, `weights`, `impacts`, `email`.
pub async fn submit(
    State(state): State<RankingAppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let mut cmd = match read_submission(multipart).await {
        Ok(cmd) => cmd,
        Err(response) => return response,
    };
    cmd.request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match state.submit_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(SubmitResponse::from(result))).into_response(),
        Err(e) => handle_submit_error(e),
    }
}

/// Collects the form fields. Unknown fields are ignored.
async fn read_submission(mut multipart: Multipart) -> Result<SubmitRankingCommand, Response> {
    let mut upload = None;
    let mut upload_name = None;
    let mut weights = None;
    let mut impacts = None;
    let mut email = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload_name = field.file_name().map(str::to_string);
                upload = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            "weights" => weights = Some(field.text().await.map_err(multipart_error)?),
            "impacts" => impacts = Some(field.text().await.map_err(multipart_error)?),
            "email" => email = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    Ok(SubmitRankingCommand {
        upload: upload.ok_or_else(|| missing_field("file"))?,
        upload_name,
        weights: weights.ok_or_else(|| missing_field("weights"))?,
        impacts: impacts.ok_or_else(|| missing_field("impacts"))?,
        email: email.ok_or_else(|| missing_field("email"))?,
        request_id: None,
    })
}

fn missing_field(field: &str) -> Response {
    let error = ValidationError::missing_field(field);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::validation(error.to_string())),
    )
        .into_response()
}

fn multipart_error(error: MultipartError) -> Response {
    let status = error.status();
    let status = if status.is_client_error() {
        status
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(ErrorResponse::bad_request(error.body_text()))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_submit_error(error: SubmitRankingError) -> Response {
    match error {
        SubmitRankingError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(e.to_string())),
        )
            .into_response(),
        SubmitRankingError::DegenerateColumn(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse::new("DEGENERATE_COLUMN", e.to_string())
                    .with_details(json!({ "column": e.column })),
            ),
        )
            .into_response(),
        SubmitRankingError::Storage(e) => {
            tracing::error!(error = %e, "Result storage failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("STORAGE_ERROR", e.to_string())),
            )
                .into_response()
        }
        SubmitRankingError::Dispatch(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse::new("DISPATCH_FAILED", e.to_string())
                    .with_details(json!({ "reason": e.code.to_string() })),
            ),
        )
            .into_response(),
        SubmitRankingError::Serialization(e) => {
            tracing::error!(error = %e, "Result serialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DegenerateColumnError;
    use crate::ports::{DispatchError, StorageError};

    #[test]
    fn validation_error_maps_to_400() {
        let error = SubmitRankingError::Validation(ValidationError::InvalidEmail {
            value: "x".to_string(),
        });
        let response = handle_submit_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn degenerate_column_maps_to_500() {
        let error = SubmitRankingError::DegenerateColumn(DegenerateColumnError::new("Price"));
        let response = handle_submit_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_error_maps_to_500() {
        let error = SubmitRankingError::Storage(StorageError::io("disk full"));
        let response = handle_submit_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn dispatch_error_maps_to_500() {
        let error = SubmitRankingError::Dispatch(DispatchError::rejected("Mailjet error: 401"));
        let response = handle_submit_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_field_maps_to_400() {
        assert_eq!(missing_field("email").status(), StatusCode::BAD_REQUEST);
    }
}

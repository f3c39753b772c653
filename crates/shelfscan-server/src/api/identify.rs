use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use shelfscan_core::Candidate;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct IdentifyRequest {
    /// OCR-extracted text lines, already trimmed by the extraction service.
    lines: Vec<String>,
}

/// Identification never hard-fails: empty or unmatchable lines come back as
/// an unresolved candidate with a zero score.
pub(super) async fn identify_by_photo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<IdentifyRequest>,
) -> Result<Json<ApiResponse<Candidate>>, ApiError> {
    let candidate = state.engine.identify_by_photo(&body.lines);
    Ok(Json(ApiResponse {
        data: candidate,
        meta: ResponseMeta::new(req_id.0),
    }))
}

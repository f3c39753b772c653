use axum::{extract::State, Extension, Json};

use shelfscan_engine::IndexStats;

use crate::middleware::RequestId;

use super::{map_engine_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Rebuild the alias index from the current catalog snapshot. Readers keep
/// serving from the old index until the swap completes.
pub(super) async fn reindex(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<IndexStats>>, ApiError> {
    let stats = state
        .engine
        .rebuild_index()
        .await
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: stats,
        meta: ResponseMeta::new(req_id.0),
    }))
}

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use shelfscan_core::Suggestion;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SuggestQuery {
    pub q: String,
    pub limit: Option<usize>,
}

pub(super) async fn suggest_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<ApiResponse<Vec<Suggestion>>>, ApiError> {
    let limit = normalize_limit(query.limit);
    let mut suggestions = state.engine.suggest_products(&query.q);
    suggestions.truncate(limit);

    Ok(Json(ApiResponse {
        data: suggestions,
        meta: ResponseMeta::new(req_id.0),
    }))
}

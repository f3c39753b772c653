use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use shelfscan_core::CompareResult;

use crate::middleware::RequestId;

use super::{map_engine_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CompareQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

pub(super) async fn compare_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<i64>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<CompareResult>>, ApiError> {
    let shopper = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        (None, None) => None,
        _ => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "lat and lng must be provided together",
            ));
        }
    };

    let result = state
        .engine
        .compare_prices(product_id, shopper)
        .await
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

mod admin;
mod compare;
mod identify;
mod suggest;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use shelfscan_engine::seed::{SeedCatalog, SeedPricing};
use shelfscan_engine::{Engine, EngineError};

use crate::middleware::{request_id, RequestId};

pub type AppEngine = Engine<SeedCatalog, SeedPricing>;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AppEngine>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    products: usize,
    aliases: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(10).clamp(1, 50)
}

pub(super) fn map_engine_error(request_id: String, error: &EngineError) -> ApiError {
    match error {
        EngineError::InvalidInput(reason) => {
            ApiError::new(request_id, "validation_error", reason.clone())
        }
        EngineError::ProductNotFound(id) => {
            ApiError::new(request_id, "not_found", format!("product {id} not found"))
        }
        EngineError::CatalogUnavailable(_) | EngineError::PricingUnavailable(_) => {
            tracing::error!(error = %error, "collaborator unavailable");
            ApiError::new(request_id, "service_unavailable", error.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/identify", post(identify::identify_by_photo))
        .route(
            "/api/products/{product_id}/compare",
            get(compare::compare_prices),
        )
        .route("/api/suggest", get(suggest::suggest_products))
        .route("/api/admin/reindex", post(admin::reindex))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let stats = state.engine.index_stats();
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            products: stats.products,
            aliases: stats.aliases,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_limit_defaults_and_clamps() {
        assert_eq!(normalize_limit(None), 10);
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(5)), 5);
        assert_eq!(normalize_limit(Some(500)), 50);
    }

    #[test]
    fn engine_errors_map_to_api_codes() {
        let err = map_engine_error(
            "req-1".to_string(),
            &EngineError::ProductNotFound(42),
        );
        assert_eq!(err.error.code, "not_found");

        let err = map_engine_error(
            "req-2".to_string(),
            &EngineError::InvalidInput("bad lat".to_string()),
        );
        assert_eq!(err.error.code, "validation_error");

        let err = map_engine_error(
            "req-3".to_string(),
            &EngineError::PricingUnavailable("down".to_string()),
        );
        assert_eq!(err.error.code, "service_unavailable");
    }

    mod routes {
        use super::super::*;
        use shelfscan_engine::seed::from_catalog_file;

        use axum::body::Body;
        use axum::http::Request;
        use chrono::Utc;
        use http_body_util::BodyExt;
        use rust_decimal::Decimal;
        use shelfscan_core::{CatalogFile, PriceFact, Product, Store};
        use std::str::FromStr;
        use tower::ServiceExt;

        fn fixture_catalog() -> CatalogFile {
            CatalogFile {
                products: vec![
                    Product {
                        id: 1,
                        name: "Butter".to_string(),
                        brand: "Anchor".to_string(),
                        gtin: Some("9414342100123".to_string()),
                        size_g: Some(500.0),
                        alternate_names: vec![],
                    },
                    Product {
                        id: 2,
                        name: "Blue Milk".to_string(),
                        brand: "Anchor".to_string(),
                        gtin: None,
                        size_g: None,
                        alternate_names: vec![],
                    },
                ],
                stores: vec![Store {
                    id: 10,
                    chain: "PaknSave".to_string(),
                    name: "PaknSave Royal Oak".to_string(),
                    latitude: -36.91,
                    longitude: 174.77,
                    address: "34 Mount Albert Rd".to_string(),
                }],
                prices: vec![PriceFact {
                    product_id: 1,
                    store_id: 10,
                    price: Decimal::from_str("6.49").unwrap(),
                    currency: "NZD".to_string(),
                    updated_at: Utc::now(),
                }],
            }
        }

        async fn test_app() -> Router {
            let (catalog, pricing) = from_catalog_file(fixture_catalog());
            let engine = Arc::new(Engine::new(
                Arc::new(catalog),
                Arc::new(pricing),
                shelfscan_engine::EngineConfig::default(),
            ));
            engine.rebuild_index().await.expect("rebuild failed");
            build_app(AppState { engine })
        }

        async fn body_json(response: axum::response::Response) -> serde_json::Value {
            let bytes = response
                .into_body()
                .collect()
                .await
                .expect("body read failed")
                .to_bytes();
            serde_json::from_slice(&bytes).expect("body was not JSON")
        }

        #[tokio::test]
        async fn healthz_reports_index_counts() {
            let response = test_app()
                .await
                .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["data"]["status"], "ok");
            assert_eq!(json["data"]["products"], 2);
            assert!(json["meta"]["request_id"].is_string());
        }

        #[tokio::test]
        async fn identify_resolves_and_echoes_lines() {
            let request = Request::post("/api/identify")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"lines":["ANCHOR BUTTER 500G SALTED"]}"#))
                .unwrap();
            let response = test_app().await.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["data"]["product_id"], 1);
            assert_eq!(json["data"]["lines"][0], "ANCHOR BUTTER 500G SALTED");
        }

        #[tokio::test]
        async fn identify_empty_lines_is_a_zero_score_ok() {
            let request = Request::post("/api/identify")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"lines":[]}"#))
                .unwrap();
            let response = test_app().await.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["data"]["score"], 0.0);
            assert!(json["data"]["product_id"].is_null());
        }

        #[tokio::test]
        async fn compare_returns_rows_and_summary() {
            let response = test_app()
                .await
                .oneshot(
                    Request::get("/api/products/1/compare")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["data"]["product"]["id"], 1);
            assert_eq!(json["data"]["prices"][0]["is_cheapest"], true);
            assert_eq!(json["data"]["summary"]["cheapest"], "6.49");
        }

        #[tokio::test]
        async fn compare_unknown_product_is_not_found() {
            let response = test_app()
                .await
                .oneshot(
                    Request::get("/api/products/999/compare")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "not_found");
        }

        #[tokio::test]
        async fn compare_with_only_latitude_is_rejected() {
            let response = test_app()
                .await
                .oneshot(
                    Request::get("/api/products/1/compare?lat=-36.8")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "validation_error");
        }

        #[tokio::test]
        async fn suggest_filters_by_substring() {
            let response = test_app()
                .await
                .oneshot(
                    Request::get("/api/suggest?q=milk")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            let names: Vec<&str> = json["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["name"].as_str().unwrap())
                .collect();
            assert_eq!(names, vec!["Blue Milk"]);
        }

        #[tokio::test]
        async fn reindex_returns_fresh_stats() {
            let response = test_app()
                .await
                .oneshot(
                    Request::post("/api/admin/reindex")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["data"]["products"], 2);
        }

        #[tokio::test]
        async fn request_id_header_is_echoed() {
            let response = test_app()
                .await
                .oneshot(
                    Request::get("/healthz")
                        .header("x-request-id", "req-abc")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(
                response.headers().get("x-request-id").unwrap(),
                "req-abc"
            );
        }
    }
}

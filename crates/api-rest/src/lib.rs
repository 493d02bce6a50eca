//! # API REST
//!
//! REST API implementation for VIRA.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for wire types and `vira-core` for classification.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ClassifyReq, ClassifyRes, HealthRes, HealthService, ListCategoriesRes, UtteranceReq,
};
use vira_core::{
    config::{max_input_chars_from_env_value, resolve_taxonomy},
    ClassifierService, CoreConfig,
};

/// Application state for the REST API server
///
/// Holds the classifier, which in turn shares the immutable startup configuration.
#[derive(Clone)]
pub struct AppState {
    classifier: ClassifierService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            classifier: ClassifierService::new(cfg),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, classify, ml_predict, list_categories),
    components(schemas(
        HealthRes,
        ClassifyReq,
        UtteranceReq,
        ClassifyRes,
        api_shared::CategoryMatchRes,
        api_shared::RecommendationRes,
        ListCategoriesRes,
        api_shared::CategorySummary,
    ))
)]
pub struct ApiDoc;

/// Resolve the core configuration from environment variables.
///
/// # Environment Variables
/// - `VIRA_TAXONOMY_FILE`: YAML taxonomy overriding the built-in table (optional)
/// - `VIRA_MAX_INPUT_CHARS`: cap on analysed user text (default: 20000)
///
/// # Errors
/// Returns an error if:
/// - the taxonomy file cannot be read, parsed or validated, or
/// - the input cap is not a positive number.
pub fn config_from_env() -> anyhow::Result<CoreConfig> {
    let taxonomy_override = std::env::var("VIRA_TAXONOMY_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let taxonomy = resolve_taxonomy(taxonomy_override)?;
    let max_input_chars =
        max_input_chars_from_env_value(std::env::var("VIRA_MAX_INPUT_CHARS").ok())?;

    Ok(CoreConfig::new(taxonomy, max_input_chars)?)
}

/// Build the REST router with all routes, Swagger UI and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/classify", post(classify))
        .route("/ml-predict", post(ml_predict))
        .route("/categories", get(list_categories))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the REST API until the server stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server fails while running.
pub async fn serve(addr: &str, cfg: Arc<CoreConfig>) -> anyhow::Result<()> {
    tracing::info!(
        categories = cfg.taxonomy().len(),
        max_input_chars = cfg.max_input_chars(),
        "-- Starting VIRA REST API on {}",
        addr
    );

    let app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/classify",
    request_body = ClassifyReq,
    responses(
        (status = 200, description = "Classification result", body = ClassifyRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Classify a conversation transcript
///
/// Scores the end user's side of the transcript against the symptom taxonomy and returns the
/// ranked categories, the overall risk and recommendations.
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the classification task fails to complete.
#[axum::debug_handler]
async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyReq>,
) -> Result<Json<ClassifyRes>, (StatusCode, &'static str)> {
    let transcript = req.into_utterances();
    let classifier = state.classifier.clone();

    match tokio::task::spawn_blocking(move || classifier.classify(&transcript)).await {
        Ok(result) => Ok(Json(ClassifyRes::from(result))),
        Err(e) => {
            tracing::error!("Classify error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/ml-predict",
    request_body = ClassifyReq,
    responses(
        (status = 200, description = "Classification result", body = ClassifyRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Alias of `/classify` kept for existing web clients.
#[axum::debug_handler]
async fn ml_predict(
    state: State<AppState>,
    req: Json<ClassifyReq>,
) -> Result<Json<ClassifyRes>, (StatusCode, &'static str)> {
    classify(state, req).await
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Symptom categories in taxonomy order", body = ListCategoriesRes)
    )
)]
/// List the symptom categories the classifier knows about
#[axum::debug_handler]
async fn list_categories(State(state): State<AppState>) -> Json<ListCategoriesRes> {
    Json(ListCategoriesRes::from(state.classifier.taxonomy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Arc::new(CoreConfig::builtin().unwrap())))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn test_classify_neck_lump() {
        let body = r#"{"transcript": [
            {"role": "VIRA", "text": "What brings you in today?"},
            {"role": "You", "text": "I have a hard painless lump in my neck that's been growing for weeks"}
        ]}"#;
        let response = app().oneshot(post_json("/classify", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["riskLevel"], "high");
        assert_eq!(json["categories"]["oncology"]["urgency"], "high");
        assert_eq!(json["categories"]["oncology"]["score"], 6);
        assert_eq!(json["recommendations"][0]["priority"], "urgent");
    }

    #[tokio::test]
    async fn test_ml_predict_alias_and_empty_transcript() {
        let response = app()
            .oneshot(post_json("/ml-predict", r#"{"transcript": []}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["riskLevel"], "low");
        assert_eq!(json["categories"], serde_json::json!({}));
        assert_eq!(
            json["recommendations"],
            serde_json::json!([{
                "priority": "low",
                "text": "No specific concerns detected. Maintain healthy habits.",
                "icon": "✅"
            }])
        );
    }

    #[tokio::test]
    async fn test_classify_tolerates_missing_text() {
        let response = app()
            .oneshot(post_json(
                "/classify",
                r#"{"transcript": [{"role": "You"}, {"role": "You", "text": null}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["riskLevel"], "low");
    }

    #[tokio::test]
    async fn test_classify_rejects_malformed_json() {
        let response = app()
            .oneshot(post_json("/classify", "{not json"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_list_categories() {
        let response = app()
            .oneshot(Request::get("/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let categories = json["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 14);
        assert_eq!(categories[0]["id"], "oncology");
        assert!(categories[0]["keywordCount"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_openapi_lists_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/classify", "/ml-predict", "/categories"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

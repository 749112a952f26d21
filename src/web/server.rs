use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::candidate::Candidate;
use crate::core::sample::{sample_candidates, SAMPLE_DOCUMENT};
use crate::core::segment::ParsedSegment;
use crate::matching::engine::{MatchResult, MatchSummary, MatchingEngine};
use crate::matching::MatchingConfig;
use crate::parsing::document::parse_document_with_config;
use crate::utils::validation::{check_candidate_limit, validate_document_size, MAX_DOCUMENT_BYTES};

/// Request body limit: the document plus a generous candidate listing
pub const MAX_REQUEST_BYTES: usize = 4 * MAX_DOCUMENT_BYTES;

/// Matching request. Missing fields fall back to the built-in sample.
#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub doc_text: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Candidate>>,
    #[serde(default)]
    pub config: Option<MatchingConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentsResponse {
    pub segments: Vec<ParsedSegment>,
}

/// Error body returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(error_type: &str, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            error_type: error_type.to_string(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn bad_request(error_type: &str, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(error_type, message)),
    )
}

/// Document text and config from a request, validated
fn request_inputs(
    doc_text: Option<String>,
    config: Option<MatchingConfig>,
) -> Result<(String, MatchingConfig), (StatusCode, Json<ErrorResponse>)> {
    let text = doc_text.unwrap_or_else(|| SAMPLE_DOCUMENT.to_string());
    validate_document_size(&text).map_err(|e| bad_request("document_too_large", e.to_string()))?;
    Ok((text, config.unwrap_or_default()))
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes without middleware
pub fn api_router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/match", post(match_handler))
        .route("/api/segments", post(segments_handler))
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router() -> anyhow::Result<Router> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?;

    let app = api_router().layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router()?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting comp-linker web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/health"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

async fn match_handler(Json(request): Json<MatchRequest>) -> ApiResult<MatchResponse> {
    let (text, config) = request_inputs(request.doc_text, request.config)?;
    let images = request.images.unwrap_or_else(sample_candidates);
    if check_candidate_limit(images.len()).is_some() {
        return Err(bad_request(
            "too_many_candidates",
            format!("{} candidates exceeds the maximum", images.len()),
        ));
    }

    let results = MatchingEngine::with_config(&images, config).match_document(&text);
    let summary = MatchSummary::from_results(&results);
    tracing::debug!(
        segments = results.len(),
        single = summary.single,
        "Handled match request"
    );

    Ok(Json(MatchResponse { results, summary }))
}

async fn segments_handler(Json(request): Json<MatchRequest>) -> ApiResult<SegmentsResponse> {
    let (text, config) = request_inputs(request.doc_text, request.config)?;
    let segments = parse_document_with_config(&text, &config.parser);
    Ok(Json(SegmentsResponse { segments }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = api_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = api_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_match_defaults_to_sample() {
        let (status, body) = post_json("/api/match", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"].as_array().unwrap().len(), 4);
        assert_eq!(body["summary"]["single"], 4);
    }

    #[tokio::test]
    async fn test_match_with_payload() {
        let (status, body) = post_json(
            "/api/match",
            serde_json::json!({
                "doc_text": "Email Comp: Mass [LINK] Major [LINK]",
                "images": [{"name": "Mass_a.png", "url": "u1"}, {"name": "Mass_b.png"}],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"][0]["type"], "multiple");
        assert_eq!(body["results"][1]["type"], "none");
        assert_eq!(body["results"][1]["segment"]["link_index_in_line"], 1);
    }

    #[tokio::test]
    async fn test_segments_with_custom_marker() {
        let (status, body) = post_json(
            "/api/segments",
            serde_json::json!({
                "doc_text": "Email Comp: {IMG} Monthly",
                "config": {"parser": {"link_marker": "{IMG}"}},
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["segments"][0]["audience"], "Monthly");
    }

    #[tokio::test]
    async fn test_oversized_document_rejected() {
        let (status, body) = post_json(
            "/api/segments",
            serde_json::json!({ "doc_text": "x".repeat(MAX_DOCUMENT_BYTES + 1) }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "document_too_large");
    }
}

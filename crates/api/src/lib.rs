mod config;
mod rate_limit;

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use pizza_agents::PizzaAgent;
use pizza_core::{Catalog, ChatInput, ChoiceSource, SeededChoice};
use pizza_observability::AppMetrics;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::ApiConfig;
use crate::rate_limit::SlidingWindowLimiter;

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<PizzaAgent>,
    pub metrics: Arc<AppMetrics>,
    pub limiter: SlidingWindowLimiter,
    pub allowed_origins: Arc<Vec<String>>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl ApiState {
    pub fn new(config: &ApiConfig, catalog: Catalog, choices: Arc<dyn ChoiceSource>) -> Self {
        let metrics = AppMetrics::shared();
        let agent = Arc::new(PizzaAgent::new(
            Arc::new(catalog),
            choices,
            metrics.clone(),
        ));

        Self {
            agent,
            metrics,
            limiter: SlidingWindowLimiter::new(config.rate_limit_window, config.rate_limit_max),
            allowed_origins: Arc::new(config.allowed_origins.clone()),
            started_at: chrono::Utc::now(),
        }
    }
}

/// A request without `input`, or with a non-string one, is answered as if
/// the input were empty.
#[derive(Debug, Clone, Default, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    input: Option<Value>,
}

impl GenerateRequest {
    fn text(&self) -> &str {
        self.input.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    started_at_utc: String,
    metrics: pizza_observability::MetricsSnapshot,
}

pub fn build_app(config: &ApiConfig) -> Router {
    let choices: Arc<dyn ChoiceSource> =
        Arc::new(SeededChoice::from_optional_seed(config.rng_seed));
    let state = ApiState::new(config, Catalog::default_menu(), choices);
    build_router(state, config.max_body_bytes)
}

pub fn build_router(state: ApiState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/menu", get(menu))
        .route("/generate", post(generate_reply))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        started_at_utc: state.started_at.to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn menu(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.agent.catalog().clone()))
}

async fn generate_reply(
    State(state): State<ApiState>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let reply = state.agent.handle_chat(ChatInput::new(request.text()));
    (
        StatusCode::OK,
        Json(GenerateResponse {
            response: reply.reply.text,
        }),
    )
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static(config::DEFAULT_ORIGIN)]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/health" | "/menu")
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if !state.limiter.allow(&ip) {
        tracing::warn!(ip = %ip, "rate limited");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "rate limit exceeded for this IP"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'; base-uri 'none'"),
    );

    response
}

// src/presentation/http/routes.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::{
    controllers::auth,
    error::HttpError,
    middleware::rate_limit::auth_rate_limit_layer,
    state::HttpState,
};
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
    pub rate_limit: bool,
}

/// Router with permissive CORS; `rate_limit` toggles the per-IP limit on
/// the auth routes.
pub fn build_router_with_rate_limiter(state: HttpState, rate_limit: bool) -> Router {
    build_router_with_options(
        state,
        RouterOptions {
            rate_limit,
            ..RouterOptions::default()
        },
    )
}

pub fn build_router_with_options(state: HttpState, options: RouterOptions) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh-tokens", post(auth::refresh_tokens));

    let auth_routes = if options.rate_limit {
        auth_routes.layer(auth_rate_limit_layer())
    } else {
        auth_routes
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/auth", auth_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

/// An empty list allows any origin. A non-empty list only ever allows its
/// own well-formed entries, even when none of them parse.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(valid_origins(allowed_origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

fn valid_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}

async fn not_found() -> HttpError {
    HttpError::from_error(ApplicationError::not_found(vec![]))
}

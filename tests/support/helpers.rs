// tests/support/helpers.rs
use super::mocks::RecordingLogger;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use dental_auth::application::{
    ports::{LoggerPort, TokenGeneratorPort, TokenVerifierPort},
    services::ApplicationServices,
};
use dental_auth::domain::token::TokenKind;
use dental_auth::infrastructure::{
    repositories::{InMemoryTokenStore, InMemoryUserStore},
    security::{
        password::Argon2PasswordHasher,
        token::{BiscuitKeys, BiscuitTokenIssuer, BiscuitTokenVerifier},
    },
    time::SystemClock,
    validation::RegisterParamsSchema,
};
use dental_auth::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tower::util::ServiceExt as _;

pub const TEST_PRIVATE_KEY_HEX: &str =
    "c2b7507bf4e3ba3ecc1ca1b1d5b4ab4b9c2e5d6a0f4e7d8c9b1a2f3e4d5c6b7a";

/// Real adapters over in-memory stores, plus handles for inspection.
pub struct TestApp {
    pub router: axum::Router,
    pub users: Arc<InMemoryUserStore>,
    pub tokens: Arc<InMemoryTokenStore>,
    pub logger: Arc<RecordingLogger>,
}

pub fn make_test_app() -> TestApp {
    let keys = BiscuitKeys::from_private_hex(TEST_PRIVATE_KEY_HEX).expect("test key");
    let access: Arc<TokenGeneratorPort> = Arc::new(BiscuitTokenIssuer::new(
        keys.clone(),
        TokenKind::Access,
        Duration::from_secs(30 * 60),
    ));
    let refresh: Arc<TokenGeneratorPort> = Arc::new(BiscuitTokenIssuer::new(
        keys.clone(),
        TokenKind::Refresh,
        Duration::from_secs(30 * 86_400),
    ));
    let verifier: Arc<TokenVerifierPort> =
        Arc::new(BiscuitTokenVerifier::new(keys.public(), TokenKind::Refresh));

    let users = Arc::new(InMemoryUserStore::new());
    let tokens = Arc::new(InMemoryTokenStore::new());
    let logger = Arc::new(RecordingLogger::default());

    let services = ApplicationServices::new(
        Arc::new(RegisterParamsSchema),
        Arc::clone(&users),
        Arc::clone(&tokens),
        Arc::new(Argon2PasswordHasher),
        access,
        refresh,
        verifier,
        Arc::new(SystemClock),
        Arc::clone(&logger) as Arc<LoggerPort>,
    );

    let router = build_router_with_rate_limiter(
        HttpState {
            services: Arc::new(services),
        },
        false,
    );

    TestApp {
        router,
        users,
        tokens,
        logger,
    }
}

pub async fn post_json(router: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}

pub async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body");
    (status, json)
}

/// Error envelope with the expected status and summary.
pub fn assert_error_envelope(status: StatusCode, body: &Value, expected: StatusCode, summary: &str) {
    assert_eq!(status, expected, "body: {body}");
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["message"], summary);
    assert!(body["errors"].is_array(), "errors must be an array: {body}");
}

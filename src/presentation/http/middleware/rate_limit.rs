// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Seconds between quota replenishments for one client IP.
const REPLENISH_EVERY_SECS: u64 = 2;
const BURST: u32 = 10;

pub type AuthRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-IP limit for the credential endpoints. The key extractor needs the
/// peer address, so the server must be run with connect info.
pub fn auth_rate_limit_layer() -> AuthRateLimitLayer {
    static RATE_LIMITER: OnceLock<AuthRateLimitLayer> = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(REPLENISH_EVERY_SECS);
            builder.burst_size(BURST);
            let config = builder
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .expect("valid rate limit configuration");

            GovernorLayer::new(config)
        })
        .clone()
}

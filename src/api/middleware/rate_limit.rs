//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Rate limiter keyed by the socket peer address.
pub type PeerRateLimit =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP`, falling back to the peer.
pub type ProxiedRateLimit =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Builds a limiter allowing `per_second` replenishment and `burst` capacity.
fn build<K: KeyExtractor>(
    key_extractor: K,
    per_second: u64,
    burst: u32,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst)
        .key_extractor(key_extractor)
        .finish()
        .expect("rate limit periods and burst sizes are non-zero");

    GovernorLayer::new(Arc::new(governor_conf))
}

/// Creates a rate limiter for public endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/s/{key}", get(redirect_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> PeerRateLimit {
    build(PeerIpKeyExtractor, 2, 100)
}

/// Same limits as [`layer`], keyed on proxy-forwarded client IPs.
///
/// Enable only when the service runs behind a trusted reverse proxy.
pub fn proxied_layer() -> ProxiedRateLimit {
    build(SmartIpKeyExtractor, 2, 100)
}

/// Creates a stricter rate limiter for link creation and deletion.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 20 requests
pub fn secure_layer() -> PeerRateLimit {
    build(PeerIpKeyExtractor, 1, 20)
}

/// Same limits as [`secure_layer`], keyed on proxy-forwarded client IPs.
pub fn proxied_secure_layer() -> ProxiedRateLimit {
    build(SmartIpKeyExtractor, 1, 20)
}

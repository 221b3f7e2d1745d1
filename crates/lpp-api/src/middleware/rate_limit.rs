use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Rate limit applied to the scoring API, per client IP
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimit {
    /// 10 requests per second with a burst of 20, enough for a student
    /// submitting answers back to back
    fn default() -> Self {
        Self {
            per_second: 10,
            burst_size: 20,
        }
    }
}

/// Apply a per-IP rate limit to a router
///
/// The client IP comes from `X-Forwarded-For`/`X-Real-IP`/`Forwarded`, falling
/// back to the peer address, so the server must be started with connect info.
/// An unusable limit (zero rate or burst) leaves the router unlimited.
pub fn apply_rate_limit<S>(router: Router<S>, limit: RateLimit) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let Some(governor_conf) = GovernorConfigBuilder::default()
        .per_second(limit.per_second)
        .burst_size(limit.burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
    else {
        tracing::warn!(?limit, "invalid rate limit configuration, rate limiting disabled");
        return router;
    };

    router.layer(GovernorLayer::new(governor_conf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        let limit = RateLimit::default();
        assert_eq!(limit.per_second, 10);
        assert_eq!(limit.burst_size, 20);
    }
}

use crate::{ConnectionRateLimiter, WsError};

use sa_config::RateLimitConfig;

use googletest::prelude::*;

#[test]
fn given_burst_within_limit_when_checked_then_all_allowed() {
    // Given
    let limiter = ConnectionRateLimiter::new(RateLimitConfig {
        max_requests: 5,
        window_secs: 60,
    });

    // When
    let allowed = (0..5).filter(|_| limiter.check().is_ok()).count();

    // Then
    assert_that!(allowed, eq(5));
}

#[test]
fn given_exhausted_limiter_when_checked_then_rate_limited() {
    // Given
    let limiter = ConnectionRateLimiter::new(RateLimitConfig {
        max_requests: 2,
        window_secs: 60,
    });
    limiter.check().unwrap();
    limiter.check().unwrap();

    // When
    let result = limiter.check();

    // Then
    assert!(matches!(
        result,
        Err(WsError::RateLimited { limit: 2, window_secs: 60, .. })
    ));
}

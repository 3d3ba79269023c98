use crate::ReconnectPolicy;

use std::time::Duration;

use googletest::prelude::*;

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn given_repeated_failures_when_next_delay_then_doubles_up_to_cap() {
    // Given
    let mut policy = ReconnectPolicy::default();

    // When
    let delays: Vec<Duration> = (0..6).map(|_| policy.next_delay()).collect();

    // Then
    assert_that!(
        delays,
        elements_are![
            eq(&secs(1)),
            eq(&secs(2)),
            eq(&secs(4)),
            eq(&secs(5)),
            eq(&secs(5)),
            eq(&secs(5))
        ]
    );
    assert_that!(policy.attempts(), eq(6));
}

#[test]
fn given_backed_off_when_reset_then_starts_over() {
    // Given
    let mut policy = ReconnectPolicy::default();
    policy.next_delay();
    policy.next_delay();
    policy.next_delay();

    // When
    policy.reset();

    // Then
    assert_that!(policy.next_delay(), eq(secs(1)));
    assert_that!(policy.attempts(), eq(1));
}

#[test]
fn given_custom_bounds_when_next_delay_then_uses_them() {
    // Given
    let mut policy = ReconnectPolicy::new(Duration::from_millis(100), Duration::from_millis(250));

    // When
    let delays: Vec<Duration> = (0..3).map(|_| policy.next_delay()).collect();

    // Then
    assert_that!(
        delays,
        elements_are![
            eq(&Duration::from_millis(100)),
            eq(&Duration::from_millis(200)),
            eq(&Duration::from_millis(250))
        ]
    );
}

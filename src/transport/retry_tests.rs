//! Tests for `RetryPolicy` and jitter sources.

use super::{IsRetryable, Jitter, NoJitter, RandomJitter, RetryDecision, RetryPolicy, TransportError};
use std::time::Duration;

/// Asserts two durations are equal within a microsecond (float rounding).
fn assert_close(actual: Duration, expected: Duration) {
    let diff = actual.abs_diff(expected);
    assert!(
        diff <= Duration::from_micros(1),
        "expected {expected:?}, got {actual:?}"
    );
}

fn connect_error() -> TransportError {
    TransportError::Connect("connection refused".into())
}

mod retry_policy_defaults {
    use super::*;

    #[test]
    fn new_creates_policy_with_defaults() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.max_attempts, RetryPolicy::DEFAULT_MAX_ATTEMPTS);
        assert_eq!(policy.initial_delay, RetryPolicy::DEFAULT_INITIAL_DELAY);
        assert_eq!(policy.max_delay, RetryPolicy::DEFAULT_MAX_DELAY);
        assert!((policy.multiplier - RetryPolicy::DEFAULT_MULTIPLIER).abs() < f64::EPSILON);
    }

    #[test]
    fn default_trait_matches_new() {
        assert_eq!(RetryPolicy::new(), RetryPolicy::default());
    }

    #[test]
    fn default_values() {
        assert_eq!(RetryPolicy::DEFAULT_MAX_ATTEMPTS, 3);
        assert_eq!(RetryPolicy::DEFAULT_INITIAL_DELAY, Duration::from_millis(200));
        assert_eq!(RetryPolicy::DEFAULT_MAX_DELAY, Duration::from_secs(3));
    }
}

mod retry_policy_builder {
    use super::*;

    #[test]
    #[should_panic(expected = "max_attempts must be at least 1")]
    fn with_max_attempts_zero_panics() {
        let _ = RetryPolicy::new().with_max_attempts(0);
    }

    #[test]
    #[should_panic(expected = "multiplier must be positive")]
    fn with_multiplier_zero_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.0);
    }

    #[test]
    fn builder_chains_correctly() {
        let policy = RetryPolicy::new()
            .with_max_attempts(10)
            .with_initial_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(30))
            .with_multiplier(3.0);

        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.initial_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_secs(30));
        assert!((policy.multiplier - 3.0).abs() < f64::EPSILON);
    }
}

mod delay_for_retry {
    use super::*;

    #[test]
    fn doubles_until_cap() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(3));

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(3));
        assert_eq!(policy.delay_for_retry(3), Duration::from_secs(3));
    }

    #[test]
    fn default_policy_sequence() {
        let policy = RetryPolicy::new();

        assert_close(policy.delay_for_retry(0), Duration::from_millis(200));
        assert_close(policy.delay_for_retry(1), Duration::from_millis(400));
        assert_close(policy.delay_for_retry(2), Duration::from_millis(800));
        assert_close(policy.delay_for_retry(3), Duration::from_millis(1600));
        assert_close(policy.delay_for_retry(4), Duration::from_secs(3));
    }

    #[test]
    fn unbounded_cap_does_not_overflow() {
        let policy = RetryPolicy::new().with_max_delay(Duration::MAX);

        assert_eq!(policy.delay_for_retry(u32::MAX), Duration::MAX);
        assert_eq!(policy.jittered_delay(u32::MAX, 0.0), Duration::ZERO);
        assert_eq!(policy.jittered_delay(u32::MAX, 1.0), Duration::MAX);
    }

    #[test]
    fn large_retry_number_caps_at_max() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.delay_for_retry(60), Duration::from_secs(3));
    }
}

mod jittered_delay {
    use super::*;

    #[test]
    fn full_factor_is_unjittered_delay() {
        let policy = RetryPolicy::new().with_initial_delay(Duration::from_secs(1));

        assert_eq!(policy.jittered_delay(1, 1.0), Duration::from_secs(2));
    }

    #[test]
    fn zero_factor_is_zero_delay() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.jittered_delay(2, 0.0), Duration::ZERO);
    }

    #[test]
    fn out_of_range_factors_are_clamped() {
        let policy = RetryPolicy::new().with_initial_delay(Duration::from_secs(1));

        assert_eq!(policy.jittered_delay(0, -5.0), Duration::ZERO);
        assert_eq!(policy.jittered_delay(0, 7.0), Duration::from_secs(1));
        assert_eq!(policy.jittered_delay(0, f64::NAN), Duration::from_secs(1));
    }

    #[test]
    fn sequence_is_non_decreasing_and_capped_for_any_factor() {
        let policy = RetryPolicy::new();

        for step in 0..=20 {
            let factor = f64::from(step) / 20.0;
            let mut previous = Duration::ZERO;
            for retry in 0..10 {
                let delay = policy.jittered_delay(retry, factor);
                assert!(delay >= previous, "factor {factor}: {delay:?} < {previous:?}");
                assert!(delay <= policy.max_delay);
                previous = delay;
            }
        }
    }

    #[test]
    fn random_draws_stay_within_bounds() {
        let policy = RetryPolicy::new();

        for retry in 0..10 {
            for _ in 0..50 {
                let delay = policy.jittered_delay(retry, RandomJitter.factor());
                assert!(delay <= policy.delay_for_retry(retry) + Duration::from_micros(1));
            }
        }
    }
}

mod decide {
    use super::*;

    #[test]
    fn retryable_error_before_last_attempt_retries() {
        let policy = RetryPolicy::new()
            .with_max_attempts(3)
            .with_initial_delay(Duration::from_secs(1));

        assert_eq!(
            policy.decide(1, &TransportError::Timeout, 1.0),
            RetryDecision::RetryAfter(Duration::from_secs(1))
        );
        assert_eq!(
            policy.decide(2, &connect_error(), 1.0),
            RetryDecision::RetryAfter(Duration::from_secs(2))
        );
    }

    #[test]
    fn last_attempt_stops() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert_eq!(
            policy.decide(3, &TransportError::Timeout, 1.0),
            RetryDecision::Stop
        );
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::new().with_max_attempts(1);

        assert_eq!(
            policy.decide(1, &TransportError::Timeout, 1.0),
            RetryDecision::Stop
        );
    }

    #[test]
    fn non_retryable_error_stops_immediately() {
        let policy = RetryPolicy::new().with_max_attempts(5);
        let error = TransportError::InvalidUrl("bad".to_string());

        assert_eq!(policy.decide(1, &error, 1.0), RetryDecision::Stop);
    }

    #[test]
    fn jitter_factor_scales_delay() {
        let policy = RetryPolicy::new().with_initial_delay(Duration::from_secs(2));

        assert_eq!(
            policy.decide(1, &TransportError::Timeout, 0.5),
            RetryDecision::RetryAfter(Duration::from_secs(1))
        );
    }
}

mod is_retryable {
    use super::*;

    #[test]
    fn transient_classes_are_retryable() {
        assert!(connect_error().is_retryable());
        assert!(TransportError::Timeout.is_retryable());
        assert!(TransportError::Protocol("connection closed early".into()).is_retryable());
    }

    #[test]
    fn configuration_failures_are_not_retryable() {
        assert!(!TransportError::InvalidUrl("x".to_string()).is_retryable());
        assert!(!TransportError::Other("redirect loop".into()).is_retryable());
    }
}

mod jitter_sources {
    use super::*;

    #[test]
    fn no_jitter_is_one() {
        assert!((NoJitter.factor() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn random_jitter_is_in_unit_interval() {
        for _ in 0..1000 {
            let factor = RandomJitter.factor();
            assert!((0.0..=1.0).contains(&factor));
        }
    }
}

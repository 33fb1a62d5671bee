use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use datecoach_core::{retry_with, CoachError, RetryPolicy};

fn transient(error: &CoachError) -> bool {
    matches!(error, CoachError::Unavailable(_))
}

#[tokio::test]
async fn retry_recovers_after_one_transient_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let result = retry_with(RetryPolicy::once_after(Duration::ZERO), transient, || {
        let counter = Arc::clone(&counter);
        async move {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt == 1 {
                Err(CoachError::Unavailable("connection reset".to_string()))
            } else {
                Ok(attempt)
            }
        }
    })
    .await
    .expect("second attempt succeeds");

    assert_eq!(result, 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn retry_gives_up_after_max_attempts() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let error = retry_with(RetryPolicy::once_after(Duration::ZERO), transient, || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(CoachError::Unavailable("still down".to_string()))
        }
    })
    .await
    .expect_err("all attempts fail");

    assert!(matches!(error, CoachError::Unavailable(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn retry_does_not_retry_permanent_errors() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let error = retry_with(RetryPolicy::new(5, Duration::ZERO), transient, || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(CoachError::InvalidInput("bad".to_string()))
        }
    })
    .await
    .expect_err("permanent error");

    assert!(matches!(error, CoachError::InvalidInput(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn zero_attempts_still_runs_once() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let _ = retry_with(RetryPolicy::new(0, Duration::ZERO), transient, || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, CoachError>(())
        }
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

use super::*;
use crate::fakes::FakeClipboard;

fn service(clipboard: FakeClipboard) -> ClipboardService<FakeClipboard> {
    ClipboardService::with_policy(
        clipboard,
        RetryPolicy {
            attempts: DEFAULT_ATTEMPTS,
            backoff: Duration::ZERO,
        },
    )
}

#[test]
fn first_attempt_success() {
    let service = service(FakeClipboard::new());

    service.set_text("hello").unwrap();

    assert_eq!(service.backend().attempts(), 1);
    assert_eq!(service.backend().text().as_deref(), Some("hello"));
}

#[test]
fn succeeds_on_third_attempt() {
    let service = service(FakeClipboard::failing_times(2));

    service.set_text("third time").unwrap();

    assert_eq!(service.backend().attempts(), 3);
    assert_eq!(service.backend().text().as_deref(), Some("third time"));
}

#[test]
fn exhausted_retries_report_unavailable() {
    let service = service(FakeClipboard::failing_times(3));

    let err = service.set_text("never").unwrap_err();

    assert_eq!(
        err,
        ClipboardError::Unavailable {
            attempts: 3,
            last: "clipboard access failed: locked".to_string(),
        }
    );
    assert_eq!(service.backend().attempts(), 3);
    assert_eq!(service.backend().text(), None);
}

#[test]
fn zero_attempts_still_tries_once() {
    let service = ClipboardService::with_policy(
        FakeClipboard::new(),
        RetryPolicy {
            attempts: 0,
            backoff: Duration::ZERO,
        },
    );

    service.set_text("once").unwrap();
    assert_eq!(service.backend().attempts(), 1);
}

#[test]
fn default_policy_matches_constants() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.attempts, 3);
    assert_eq!(policy.backoff, Duration::from_millis(40));
}

use super::*;
use crate::fakes::{FakeWindows, WindowCall};
use crate::foreground::ForegroundTracker;

const TARGET: WindowHandle = WindowHandle::from_raw(0x100);

fn setup() -> (Arc<FakeWindows>, ForegroundTracker<FakeWindows>) {
    let windows = Arc::new(FakeWindows::new());
    windows.add_window(TARGET, 4242);
    let tracker = ForegroundTracker::start(Arc::clone(&windows));
    (windows, tracker)
}

fn dispatcher(
    windows: &Arc<FakeWindows>,
    tracker: &ForegroundTracker<FakeWindows>,
) -> PasteDispatcher<FakeWindows> {
    PasteDispatcher::with_delay(Arc::clone(windows), tracker.tracked(), Duration::ZERO)
}

#[test]
fn no_tracked_window_is_a_no_op() {
    let (windows, tracker) = setup();
    windows.clear_calls();

    let outcome = dispatcher(&windows, &tracker).paste_into_last_external();

    assert_eq!(outcome, PasteOutcome::NoTarget);
    assert!(windows.calls().is_empty());
}

#[test]
fn stale_window_is_checked_but_not_activated() {
    let (windows, tracker) = setup();
    windows.emit_foreground(TARGET);
    windows.close_window(TARGET);
    windows.clear_calls();

    let outcome = dispatcher(&windows, &tracker).paste_into_last_external();

    assert_eq!(outcome, PasteOutcome::TargetGone(TARGET));
    assert_eq!(windows.calls(), vec![WindowCall::IsWindowLive(TARGET)]);
}

#[test]
fn live_window_is_activated_then_pasted() {
    let (windows, tracker) = setup();
    windows.emit_foreground(TARGET);
    windows.clear_calls();

    let outcome = dispatcher(&windows, &tracker).paste_into_last_external();

    assert_eq!(outcome, PasteOutcome::Pasted(TARGET));
    assert_eq!(
        windows.calls(),
        vec![
            WindowCall::IsWindowLive(TARGET),
            WindowCall::SetForegroundWindow(TARGET),
            WindowCall::SendPasteKeystroke,
        ]
    );
    assert_eq!(windows.foreground(), Some(TARGET));
}

#[test]
fn refused_activation_skips_keystroke() {
    let (windows, tracker) = setup();
    windows.emit_foreground(TARGET);
    windows.refuse_activation();
    windows.clear_calls();

    let outcome = dispatcher(&windows, &tracker).paste_into_last_external();

    assert_eq!(outcome, PasteOutcome::ActivationRefused(TARGET));
    assert!(outcome.is_reportable_failure());
    assert!(!windows.calls().contains(&WindowCall::SendPasteKeystroke));
}

#[test]
fn failed_keystroke_is_reported() {
    let (windows, tracker) = setup();
    windows.emit_foreground(TARGET);
    windows.fail_keystrokes();

    let outcome = dispatcher(&windows, &tracker).paste_into_last_external();

    assert_eq!(outcome, PasteOutcome::KeystrokeFailed(TARGET));
    assert!(outcome.is_reportable_failure());
}

#[test]
fn vanished_target_is_not_reportable() {
    assert!(!PasteOutcome::NoTarget.is_reportable_failure());
    assert!(!PasteOutcome::TargetGone(TARGET).is_reportable_failure());
    assert!(!PasteOutcome::Pasted(TARGET).is_reportable_failure());
}

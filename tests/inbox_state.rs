//! End-to-end exercises of the inbox state machine through the public API:
//! polling, selection races, optimistic removal, and session teardown.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::SystemTime;

use tmail::api::models::{MessageDetail, MessageSummary};
use tmail::inbox::{self, DetailState, InboxState, OpenHook, PollOutcome};
use tmail::session::Session;

fn summary(id: &str) -> MessageSummary {
    MessageSummary {
        id: id.to_string(),
        from: None,
        subject: Some(format!("subject {id}")),
        created_at: Some("2026-08-30T10:00:00Z".to_string()),
    }
}

fn detail(id: &str) -> MessageDetail {
    MessageDetail {
        id: id.to_string(),
        from: None,
        subject: None,
        created_at: None,
        html: vec![],
        text: Some(format!("body {id}")),
    }
}

struct CountingHook(AtomicU32);

impl OpenHook for CountingHook {
    fn on_first_open(&self, _id: &str) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn new_mail_signal_matches_count_growth() {
    let mut state = InboxState::default();

    // 0 -> 2 messages: signal.
    let outcome = state.apply_poll(state.epoch(), vec![summary("a"), summary("b")]);
    assert_eq!(outcome, PollOutcome::Applied { new_mail: true });

    // 2 -> 3: signal.
    let outcome = state.apply_poll(
        state.epoch(),
        vec![summary("a"), summary("b"), summary("c")],
    );
    assert_eq!(outcome, PollOutcome::Applied { new_mail: true });

    // 3 -> 2, even with different ids: no signal.
    let outcome = state.apply_poll(state.epoch(), vec![summary("x"), summary("y")]);
    assert_eq!(outcome, PollOutcome::Applied { new_mail: false });
}

#[test]
fn repeated_identical_poll_does_not_signal() {
    let mut state = InboxState::default();
    state.apply_poll(state.epoch(), vec![summary("a"), summary("b")]);

    let outcome = state.apply_poll(state.epoch(), vec![summary("a"), summary("b")]);
    assert_eq!(outcome, PollOutcome::Applied { new_mail: false });
}

#[test]
fn last_selected_wins_on_out_of_order_completion() {
    let mut state = InboxState::default();
    state.apply_poll(state.epoch(), vec![summary("a"), summary("b")]);

    let slow = state.select("a").expect("ticket a");
    let fast = state.select("b").expect("ticket b");

    // b completes first, then a's stale result arrives.
    assert!(state.apply_detail(&fast, Ok(detail("b"))));
    assert!(!state.apply_detail(&slow, Ok(detail("a"))));

    match state.detail() {
        DetailState::Ready(current) => assert_eq!(current.id, "b"),
        other => panic!("expected b's detail, got {other:?}"),
    }
    assert_eq!(state.selected(), Some("b"));
}

#[test]
fn deleting_selected_message_deselects() {
    let mut state = InboxState::default();
    state.apply_poll(state.epoch(), vec![summary("a"), summary("b")]);
    state.select("a");

    state.remove_locally("a");
    assert_eq!(state.selected(), None);

    state.select("b");
    state.remove_locally("does-not-exist");
    assert_eq!(state.selected(), Some("b"));
}

#[test]
fn poll_resolving_after_clear_does_not_repopulate() {
    let mut state = InboxState::default();
    state.apply_poll(state.epoch(), vec![summary("a")]);

    let in_flight_epoch = state.epoch();
    state.reset();

    let outcome = state.apply_poll(in_flight_epoch, vec![summary("a"), summary("b")]);
    assert_eq!(outcome, PollOutcome::Stale);
    assert!(state.messages().is_empty());
}

#[test]
fn open_hook_fires_once_per_session_and_resets_on_clear() {
    let hook = CountingHook(AtomicU32::new(0));

    let mut session = Session::new("a@b.test", "tok", "pw", SystemTime::now()).expect("session");
    assert!(inbox::note_first_open(&mut session, &hook, "m-1"));
    assert!(!inbox::note_first_open(&mut session, &hook, "m-1"));
    assert!(!inbox::note_first_open(&mut session, &hook, "m-1"));
    assert_eq!(hook.0.load(Ordering::Relaxed), 1);

    // Clearing the session and creating a new one resets the triggered set.
    let mut session = Session::new("a@b.test", "tok2", "pw", SystemTime::now()).expect("session");
    assert!(inbox::note_first_open(&mut session, &hook, "m-1"));
    assert_eq!(hook.0.load(Ordering::Relaxed), 2);
}

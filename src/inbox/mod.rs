pub mod poller;
pub mod state;

pub use poller::{InboxEvent, NEW_MAIL_FLASH, POLL_INTERVAL, Poller};
pub use state::{DetailState, FetchTicket, InboxState, PollOutcome};

use crate::session::Session;

/// Side effect fired the first time a message is opened within a session.
pub trait OpenHook {
    fn on_first_open(&self, id: &str);
}

/// Default hook: an audit log line. The triggered set resets with the
/// session, so the same id fires again after a clear-and-recreate.
pub struct LogOpenHook;

impl OpenHook for LogOpenHook {
    fn on_first_open(&self, id: &str) {
        log::info!("message {id} opened for the first time this session");
    }
}

/// Fires the hook exactly once per id per session. The caller persists the
/// session afterwards when this returns true.
pub fn note_first_open(session: &mut Session, hook: &dyn OpenHook, id: &str) -> bool {
    let first = session.mark_opened(id);
    if first {
        hook.on_first_open(id);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::SystemTime;

    struct CountingHook {
        fired: Cell<u32>,
    }

    impl OpenHook for CountingHook {
        fn on_first_open(&self, _id: &str) {
            self.fired.set(self.fired.get() + 1);
        }
    }

    fn fresh_session() -> Session {
        Session::new("a@b.test", "tok", "pw", SystemTime::now()).expect("session")
    }

    #[test]
    fn hook_fires_once_per_id() {
        let mut session = fresh_session();
        let hook = CountingHook { fired: Cell::new(0) };

        assert!(note_first_open(&mut session, &hook, "m1"));
        assert!(!note_first_open(&mut session, &hook, "m1"));
        assert!(!note_first_open(&mut session, &hook, "m1"));
        assert_eq!(hook.fired.get(), 1);

        assert!(note_first_open(&mut session, &hook, "m2"));
        assert_eq!(hook.fired.get(), 2);
    }

    #[test]
    fn hook_refires_after_session_recreate() {
        let hook = CountingHook { fired: Cell::new(0) };

        let mut session = fresh_session();
        note_first_open(&mut session, &hook, "m1");

        // Clear and recreate: the opened set starts empty again.
        let mut session = fresh_session();
        assert!(note_first_open(&mut session, &hook, "m1"));
        assert_eq!(hook.fired.get(), 2);
    }
}

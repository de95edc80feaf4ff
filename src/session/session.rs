use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// The single active mailbox credential set, plus the ids whose first-open
/// hook has already fired this session. Both live and die together: clearing
/// the session resets the opened set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub address: String,
    pub token: String,
    pub password: String,
    pub created_at_unix: u64,
    #[serde(default)]
    pub opened: BTreeSet<String>,
}

impl Session {
    pub fn new(
        address: impl Into<String>,
        token: impl Into<String>,
        password: impl Into<String>,
        created_at: SystemTime,
    ) -> AppResult<Self> {
        let address = address.into();
        let token = token.into();

        if address.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "mailbox address must not be empty".to_string(),
            ));
        }
        if token.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "auth token must not be empty".to_string(),
            ));
        }

        let created_at_unix = created_at
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or_default();

        Ok(Self {
            address,
            token,
            password: password.into(),
            created_at_unix,
            opened: BTreeSet::new(),
        })
    }

    /// Records that a message was opened. Returns true the first time an id
    /// is seen, which is the caller's cue to fire the one-time open hook.
    pub fn mark_opened(&mut self, id: &str) -> bool {
        self.opened.insert(id.to_string())
    }

    pub fn age_seconds(&self, now: SystemTime) -> u64 {
        let Ok(duration) = now.duration_since(UNIX_EPOCH) else {
            return 0;
        };
        duration.as_secs().saturating_sub(self.created_at_unix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rejects_empty_address() {
        let result = Session::new("", "tok", "pw", SystemTime::now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn rejects_empty_token() {
        let result = Session::new("a@b.test", "  ", "pw", SystemTime::now());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn mark_opened_is_first_time_only() {
        let mut session =
            Session::new("a@b.test", "tok", "pw", SystemTime::now()).expect("session");

        assert!(session.mark_opened("msg-1"));
        assert!(!session.mark_opened("msg-1"));
        assert!(session.mark_opened("msg-2"));
    }

    #[test]
    fn age_counts_from_creation() {
        let created = SystemTime::now();
        let session = Session::new("a@b.test", "tok", "pw", created).expect("session");
        let age = session.age_seconds(created + Duration::from_secs(90));
        assert_eq!(age, 90);
    }
}

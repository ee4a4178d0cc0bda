// src/models/session.rs
use tracing::debug;

use super::User;

/// Slot holding the current candidate, if any. Owned by the root view; lives
/// only in memory.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Option<User>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self {
            current: Some(user),
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Replace the current user. Last writer wins.
    pub fn set_user(&mut self, user: User) {
        debug!("Session user set: {}", user.email);
        self.current = Some(user);
    }

    pub fn clear(&mut self) {
        if let Some(user) = self.current.take() {
            debug!("Session cleared for: {}", user.email);
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            uuid: "u".to_string(),
            candidate_id: "c".to_string(),
            application_id: "a".to_string(),
            first_name: "F".to_string(),
            last_name: "L".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_last_writer_wins() {
        let mut session = SessionState::new();
        assert!(!session.is_logged_in());

        session.set_user(user("first@example.com"));
        session.set_user(user("second@example.com"));
        assert_eq!(session.current().unwrap().email, "second@example.com");

        session.clear();
        assert!(session.current().is_none());
    }
}

// src/application/session.rs
//
// The signed-in user, held as explicit context rather than a global.
// Created on sign-in or sign-up, cleared on sign-out, never persisted.

use tokio::sync::watch;

use crate::domain::access::{initial_screen, screens_for, Screen};
use crate::domain::user::{Role, Session};

pub struct SessionContext {
    sender: watch::Sender<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.sender.borrow().as_ref().map(|session| session.role)
    }

    pub fn is_signed_in(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Replace whatever session was active
    pub fn begin(&self, session: Session) {
        log::debug!("Session started for {} ({})", session.user_id, session.role);
        self.sender.send_replace(Some(session));
    }

    /// Clear the session, returning the one that ended
    pub fn end(&self) -> Option<Session> {
        let ended = self.sender.send_replace(None);
        if let Some(session) = &ended {
            log::debug!("Session ended for {}", session.user_id);
        }
        ended
    }

    /// Change notification: every begin/end is observed
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }

    /// Screens reachable with the current role
    pub fn screens(&self) -> &'static [Screen] {
        screens_for(self.role())
    }

    pub fn initial_screen(&self) -> Screen {
        initial_screen(self.role())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserProfile;
    use uuid::Uuid;

    fn admin() -> Session {
        Session::from_profile(&UserProfile::new(
            Uuid::new_v4(),
            "ann@x.io".to_string(),
            None,
            Role::Admin,
        ))
    }

    #[test]
    fn test_starts_signed_out() {
        let ctx = SessionContext::new();
        assert!(ctx.current().is_none());
        assert_eq!(ctx.initial_screen(), Screen::Login);
        assert_eq!(ctx.screens(), &[Screen::Login, Screen::SignUp]);
    }

    #[test]
    fn test_begin_and_end() {
        let ctx = SessionContext::new();
        let session = admin();

        ctx.begin(session.clone());
        assert_eq!(ctx.role(), Some(Role::Admin));
        assert!(ctx.screens().contains(&Screen::AddReport));
        assert_eq!(ctx.initial_screen(), Screen::Home);

        assert_eq!(ctx.end(), Some(session));
        assert!(!ctx.is_signed_in());
        assert_eq!(ctx.end(), None);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let ctx = SessionContext::new();
        let mut changes = ctx.subscribe();

        ctx.begin(admin());
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().is_some());

        ctx.end();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().is_none());
    }
}

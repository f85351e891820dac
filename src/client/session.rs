use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use crate::auth::{AuthUser, Session};

/// Auth state transitions, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(AuthUser),
    TokenRefreshed(AuthUser),
    SignedOut,
}

/// The locally held session plus change notification.
///
/// `subscribe` hands out a `watch` receiver that always sees the latest
/// session; `events` delivers each transition for callers that care about
/// what happened rather than the current value.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Option<Session>>>,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        let (events, _) = broadcast::channel(16);
        SessionStore {
            state: Arc::new(state),
            events,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.state.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Stores `session`. Replacing a session of the same user counts as a refresh.
    pub fn set(&self, session: Session) {
        let user = session.user.clone();
        let previous = self.state.send_replace(Some(session));

        let event = match previous {
            Some(ref old) if old.user.id == user.id => AuthEvent::TokenRefreshed(user),
            _ => AuthEvent::SignedIn(user),
        };
        // No listeners is fine.
        let _ = self.events.send(event);
    }

    pub fn clear(&self) {
        if self.state.send_replace(None).is_some() {
            let _ = self.events.send(AuthEvent::SignedOut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session(user: Uuid, token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: format!("refresh-{}", token),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at: None,
            user: AuthUser {
                id: user,
                email: Some("mei@u.nus.edu".to_string()),
            },
        }
    }

    #[test]
    fn test_store_starts_signed_out() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in());
        assert!(store.current().is_none());
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_events_follow_transitions() {
        let store = SessionStore::new();
        let mut events = store.events();
        let user = Uuid::new_v4();

        store.set(session(user, "a"));
        store.set(session(user, "b"));
        store.clear();
        store.clear();

        assert!(matches!(events.recv().await.unwrap(), AuthEvent::SignedIn(u) if u.id == user));
        assert!(matches!(events.recv().await.unwrap(), AuthEvent::TokenRefreshed(u) if u.id == user));
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_session() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set(session(Uuid::new_v4(), "a"));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|s| s.access_token.clone()),
            Some("a".to_string())
        );

        store.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_switching_user_is_a_sign_in() {
        let store = SessionStore::new();
        let mut events = store.events();

        store.set(session(Uuid::new_v4(), "a"));
        store.set(session(Uuid::new_v4(), "b"));

        assert!(matches!(events.try_recv().unwrap(), AuthEvent::SignedIn(_)));
        assert!(matches!(events.try_recv().unwrap(), AuthEvent::SignedIn(_)));
    }
}

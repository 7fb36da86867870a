//! Client-side session state
//!
//! A pure reducer over [`SessionState`] plus the [`Session`] value that owns
//! the current state. The application holds one `Session` and passes it
//! down; only [`Session::dispatch`] changes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// The signed-in user as the API returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A login or update request is in flight
    Fetching,
    Success(User),
    Failure,
}

impl SessionState {
    /// The held user, only present after a successful login or update
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Success(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, SessionState::Fetching)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SessionState::Failure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    LoginStart,
    LoginSuccess(User),
    LoginFailure,
    UpdateStart,
    UpdateSuccess(User),
    UpdateFailure,
    DeleteUser,
    Logout,
}

/// Next state for an action; the previous state never survives a transition
pub fn reduce(_state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::LoginStart | SessionAction::UpdateStart => SessionState::Fetching,
        SessionAction::LoginSuccess(user) | SessionAction::UpdateSuccess(user) => {
            SessionState::Success(user)
        }
        SessionAction::LoginFailure | SessionAction::UpdateFailure => SessionState::Failure,
        SessionAction::DeleteUser | SessionAction::Logout => SessionState::Idle,
    }
}

/// Owner of the current session state
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn dispatch(&mut self, action: SessionAction) {
        debug!("Session action: {:?}", action);
        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            profile_pic: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn login_round_trip() {
        let mut session = Session::new();
        assert_eq!(session.state(), &SessionState::Idle);

        session.dispatch(SessionAction::LoginStart);
        assert!(session.state().is_fetching());
        assert!(session.user().is_none());

        let alice = user("alice01");
        session.dispatch(SessionAction::LoginSuccess(alice.clone()));
        assert_eq!(session.user(), Some(&alice));
    }

    #[test]
    fn failures_discard_the_held_user() {
        let mut session = Session::new();
        session.dispatch(SessionAction::LoginSuccess(user("alice01")));

        session.dispatch(SessionAction::UpdateStart);
        assert!(session.state().is_fetching());

        session.dispatch(SessionAction::UpdateFailure);
        assert!(session.state().is_failure());
        assert!(session.user().is_none());

        session.dispatch(SessionAction::LoginFailure);
        assert_eq!(session.state(), &SessionState::Failure);
    }

    #[test]
    fn update_success_replaces_user() {
        let mut session = Session::new();
        session.dispatch(SessionAction::LoginSuccess(user("alice01")));

        let renamed = user("alice02");
        session.dispatch(SessionAction::UpdateStart);
        session.dispatch(SessionAction::UpdateSuccess(renamed.clone()));
        assert_eq!(session.user(), Some(&renamed));
    }

    #[test]
    fn delete_and_logout_clear_everything() {
        for action in [SessionAction::DeleteUser, SessionAction::Logout] {
            let state = reduce(SessionState::Success(user("alice01")), action);
            assert_eq!(state, SessionState::Idle);
        }
    }
}

use std::sync::{PoisonError, RwLock};

/// Snapshot of the login state at the moment an operation started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct AuthState {
    token: Option<String>,
    generation: u64,
}

/// Holds the bearer token for the current user.
///
/// Every login and logout bumps the session generation, so work started
/// under one session can tell that it finished under another.
#[derive(Debug, Default)]
pub struct AuthStore {
    state: RwLock<AuthState>,
}

impl AuthStore {
    /// Create a logged-out store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already logged in
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.login(token);
        store
    }

    /// Replace the current token. Blank tokens log the user out.
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.token = if token.trim().is_empty() { None } else { Some(token) };
        state.generation += 1;
    }

    pub fn logout(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.token = None;
        state.generation += 1;
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).token.is_some()
    }

    /// Current session, or `None` when logged out
    pub fn session(&self) -> Option<Session> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.token.as_ref().map(|token| Session {
            token: token.clone(),
            generation: state.generation,
        })
    }

    /// Whether `session` is still the live login
    pub fn is_current(&self, session: &Session) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.token.is_some() && state.generation == session.generation
    }
}

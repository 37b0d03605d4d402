//! Login state machine

use crate::store::Reducer;
use crate::types::User;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Message shown when a rejection carries no reason
pub const DEFAULT_REJECTION: &str = "Something went wrong";

/// Progress of the last login attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    #[default]
    Uninitialized,
    Pending,
    Fulfilled,
    Rejected,
}

/// Who is logged in, and how the last attempt went
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub authenticated: bool,
    pub token_verified: bool,
    pub user: Option<User>,
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: AuthStatus,
}

impl AuthState {
    /// Logged-out state
    pub fn new() -> Self {
        Self::default()
    }

    /// Bearer token of the logged-in user
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.token.as_deref())
    }
}

/// Login lifecycle events
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Pending,
    Fulfilled(User),
    Rejected(String),
}

impl Reducer for AuthState {
    type Action = AuthAction;
    type Error = Infallible;

    fn apply(&mut self, action: AuthAction) -> Result<(), Infallible> {
        match action {
            AuthAction::Pending => {
                self.status = AuthStatus::Pending;
                self.loading = true;
            }
            AuthAction::Fulfilled(user) => {
                self.loading = false;
                self.authenticated = true;
                self.token_verified = true;
                self.user = Some(user);
                self.status = AuthStatus::Fulfilled;
            }
            AuthAction::Rejected(message) => {
                self.loading = false;
                self.authenticated = false;
                self.token_verified = false;
                self.user = None;
                self.error = Some(if message.is_empty() {
                    DEFAULT_REJECTION.to_string()
                } else {
                    message
                });
                self.status = AuthStatus::Rejected;
            }
        }
        Ok(())
    }
}

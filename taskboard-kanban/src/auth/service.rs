//! Login endpoint contract and the flow that drives [`AuthState`]

use super::state::{AuthAction, AuthState};
use crate::store::Reducer;
use crate::types::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taskboard_common::{ErrorSeverity, Severity};
use thiserror::Error;
use tracing::{info, warn};

/// Email and password sent to the login endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors from a login attempt
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server refused the credentials
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape
    #[error("could not decode login response: {0}")]
    Decode(String),
}

impl Severity for AuthError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(_) => ErrorSeverity::Warning,
            Self::Network(_) | Self::Decode(_) => ErrorSeverity::Error,
        }
    }
}

/// Remote login endpoint
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a user record carrying a token
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError>;
}

#[async_trait]
impl<T: AuthService + ?Sized> AuthService for Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        (**self).login(credentials).await
    }
}

fn dispatch(state: &mut AuthState, action: AuthAction) {
    match state.apply(action) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Run one login attempt, recording every step in `state`
pub async fn authenticate<A>(
    state: &mut AuthState,
    service: &A,
    credentials: &Credentials,
) -> Result<User, AuthError>
where
    A: AuthService + ?Sized,
{
    dispatch(state, AuthAction::Pending);
    match service.login(credentials).await {
        Ok(user) => {
            info!(user = %user.id, "logged in");
            dispatch(state, AuthAction::Fulfilled(user.clone()));
            Ok(user)
        }
        Err(e) => {
            warn!(email = %credentials.email, error = %e, "login failed");
            let message = match &e {
                AuthError::Rejected(message) => message.clone(),
                other => other.to_string(),
            };
            dispatch(state, AuthAction::Rejected(message));
            Err(e)
        }
    }
}

//! Authentication state and the login flow

mod service;
mod state;

pub use service::{authenticate, AuthError, AuthService, Credentials};
pub use state::{AuthAction, AuthState, AuthStatus, DEFAULT_REJECTION};

//! Admin sign-in state.

use crate::error::{Error, Result};
use crate::types::Session;

use super::Newsroom;

impl Newsroom {
    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "Email and password are required.".to_string(),
            ));
        }
        self.auth.sign_in(email, password).await
    }

    /// Session for a bearer token, if it is still live
    pub async fn current_session(&self, token: &str) -> Result<Option<Session>> {
        self.auth.current_session(token).await
    }

    /// Close the session for `token`. Signing out twice is not an error.
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        if self.auth.sign_out(token).await?.is_none() {
            tracing::debug!("sign-out for unknown or closed session");
        }
        Ok(())
    }
}

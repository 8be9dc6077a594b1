//! Authentication Collaborator
//!
//! The wizard only needs "authenticated user identity available, or not".
//! The sign-in mechanism (social login, credential form) lives outside the
//! core behind the [`AuthProvider`] seam.

use async_trait::async_trait;
use thiserror::Error;

/// Minimal user identity produced by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Sign-in rejected: {0}")]
    Rejected(String),

    #[error("Auth provider unavailable: {0}")]
    Unavailable(String),
}

/// Authentication provider seam.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Perform a sign-in, returning the user identity on success.
    async fn sign_in(&self) -> Result<UserIdentity, AuthError>;
}

/// Fixed-identity provider standing in for a real login flow.
pub struct StaticAuthProvider {
    identity: UserIdentity,
}

impl StaticAuthProvider {
    pub fn new(identity: UserIdentity) -> Self {
        Self { identity }
    }
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new(UserIdentity::new("Murtaza", "demo@afgtopup.com"))
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn sign_in(&self) -> Result<UserIdentity, AuthError> {
        Ok(self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticAuthProvider::default();
        let identity = provider.sign_in().await.unwrap();
        assert_eq!(identity.email, "demo@afgtopup.com");
    }
}

use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordHasher;
use crate::store::StoredUser;
use crate::store::UserStore;

/// Authentication coordinator combining password verification, token
/// issuance and token validation against a user store.
///
/// Both failure types are opaque: callers learn that a check
/// failed, never which one.
pub struct Authenticator<S, C = SystemClock>
where
    S: UserStore,
    C: Clock,
{
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    store: Arc<S>,
    clock: C,
}

/// Login rejected: unknown email or wrong password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Incorrect email or password")]
pub struct CredentialError;

/// Bearer token rejected: malformed, badly signed, expired, missing its
/// subject, or naming a user that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid credentials.")]
pub struct AuthenticationError;

impl<S> Authenticator<S, SystemClock>
where
    S: UserStore,
{
    /// Create a new authenticator signing HS256 tokens against the wall clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `store` - User lookup used at login and on every token validation
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], store: Arc<S>) -> Self {
        Self::from_parts(JwtHandler::new(jwt_secret), store, SystemClock)
    }
}

impl<S, C> Authenticator<S, C>
where
    S: UserStore,
    C: Clock,
{
    /// Assemble an authenticator from an already configured JWT handler and clock.
    pub fn from_parts(jwt_handler: JwtHandler, store: Arc<S>, clock: C) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            store,
            clock,
        }
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify login credentials.
    ///
    /// # Arguments
    /// * `email` - Email the user logs in with
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The matching user record
    ///
    /// # Errors
    /// * `CredentialError` - No such user, lookup failed, or password does not match
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<S::User, CredentialError> {
        let Some(user) = self.find_user(email).await else {
            tracing::debug!("Login rejected: unknown email");
            return Err(CredentialError);
        };

        if !self.verify_password(password, user.password_hash()) {
            tracing::debug!("Login rejected: password mismatch");
            return Err(CredentialError);
        }

        Ok(user)
    }

    /// Issue a signed access token.
    ///
    /// The caller's claims are copied and stamped with `iat = now` and
    /// `exp = now + ttl`; these server-computed values replace any the caller
    /// supplied.
    ///
    /// # Arguments
    /// * `claims` - Claims to embed, normally carrying the user's email as subject
    /// * `ttl` - How long the token stays valid
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `JwtError` - Token encoding failed
    pub fn issue_token(&self, claims: &Claims, ttl: Duration) -> Result<String, JwtError> {
        let claims = claims.stamped(self.clock.now(), ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a bearer token and resolve the user it was issued for.
    ///
    /// Checks run in order and stop at the first failure: signature and
    /// structure, expiration, subject, then the user lookup.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// The user named by the token's subject
    ///
    /// # Errors
    /// * `AuthenticationError` - Any check failed
    pub async fn validate_token(&self, token: &str) -> Result<S::User, AuthenticationError> {
        let claims: Claims = self.jwt_handler.decode(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthenticationError
        })?;

        if claims.is_expired(self.clock.now()) {
            tracing::debug!(exp = ?claims.exp, "Token rejected: expired");
            return Err(AuthenticationError);
        }

        let Some(email) = claims.subject() else {
            tracing::debug!("Token rejected: missing subject");
            return Err(AuthenticationError);
        };

        self.find_user(email).await.ok_or_else(|| {
            tracing::debug!("Token rejected: subject does not resolve to a user");
            AuthenticationError
        })
    }

    async fn find_user(&self, email: &str) -> Option<S::User> {
        match self.store.find_user_by_email(email).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "User lookup failed");
                None
            }
        }
    }
}

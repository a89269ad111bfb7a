use std::fmt::Display;

use async_trait::async_trait;

/// A user record as seen by the authentication core.
pub trait StoredUser {
    /// Unique email the user logs in with.
    fn email(&self) -> &str;

    /// Password hash in PHC string format.
    fn password_hash(&self) -> &str;
}

/// Read access to user records, narrowed to the single lookup the
/// authentication core needs.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    type User: StoredUser + Send;
    type Error: Display + Send;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// Any lookup failure; the core treats it the same as a missing user
    async fn find_user_by_email(&self, email: &str) -> Result<Option<Self::User>, Self::Error>;
}

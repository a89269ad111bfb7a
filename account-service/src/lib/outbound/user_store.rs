use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::UserStore;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Authenticator wired to a user repository.
pub type AccountAuthenticator<R> = Authenticator<RepositoryUserStore<R>>;

/// Exposes a [`UserRepository`] to the authentication core as a read-only
/// email lookup.
pub struct RepositoryUserStore<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> RepositoryUserStore<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UserStore for RepositoryUserStore<R>
where
    R: UserRepository,
{
    type User = User;
    type Error = UserError;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        // a string that is not an email cannot name an account
        let Ok(email) = EmailAddress::new(email) else {
            return Ok(None);
        };

        self.repository.find_by_email(&email).await
    }
}

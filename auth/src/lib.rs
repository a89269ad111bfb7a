//! Authentication core library
//!
//! Credential checks and the bearer-token lifecycle:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bound JWT access tokens
//! - Token validation resolving the user the token was issued for
//!
//! User records are reached only through the [`UserStore`] port, so services
//! plug in their own persistence without exposing it to this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, Claims, PasswordHasher, StoredUser, UserStore};
//!
//! struct User {
//!     email: String,
//!     password_hash: String,
//! }
//!
//! impl StoredUser for User {
//!     fn email(&self) -> &str {
//!         &self.email
//!     }
//!
//!     fn password_hash(&self) -> &str {
//!         &self.password_hash
//!     }
//! }
//!
//! struct SingleUser(String);
//!
//! #[async_trait::async_trait]
//! impl UserStore for SingleUser {
//!     type User = User;
//!     type Error = std::convert::Infallible;
//!
//!     async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Self::Error> {
//!         Ok((email == "alice@example.com").then(|| User {
//!             email: email.to_string(),
//!             password_hash: self.0.clone(),
//!         }))
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let hash = PasswordHasher::new().hash("correct-horse").unwrap();
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Arc::new(SingleUser(hash)));
//!
//! // Login: verify credentials, then issue a token
//! let user = auth.authenticate("alice@example.com", "correct-horse").await.unwrap();
//! let claims = Claims::new().with_subject(user.email());
//! let token = auth.issue_token(&claims, chrono::Duration::minutes(15)).unwrap();
//!
//! // Later request: resolve the token back to the user
//! let current = auth.validate_token(&token).await.unwrap();
//! assert_eq!(current.email(), "alice@example.com");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod store;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::CredentialError;
pub use clock::Clock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use store::StoredUser;
pub use store::UserStore;

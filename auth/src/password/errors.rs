use thiserror::Error;

/// Error type for password hashing.
///
/// Verification never fails: a malformed hash simply does not match.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

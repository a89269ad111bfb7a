//! Signed access tokens: the claim set and the HMAC signer/verifier.

mod claims;
mod errors;
mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;

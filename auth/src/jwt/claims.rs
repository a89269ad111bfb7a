use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim names computed by the issuer. Custom claims under these names are
/// dropped.
const SERVER_CLAIMS: [&str; 2] = ["exp", "iat"];

/// JWT claims structure.
///
/// The registered claims used by this crate plus free-form fields via
/// [`Claims::with_extra`]. Everything is optional so that a token with a
/// missing subject still decodes and can be rejected explicitly.
///
/// A claim name appears at most once in the serialized payload: custom claims
/// named `sub` are routed into the subject and those named `exp` or `iat`
/// are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the user's email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Add a custom claim.
    ///
    /// A `sub` key sets the subject when its value is a string. Values that do
    /// not serialize, non-string subjects and the server-computed `exp`/`iat`
    /// are dropped with a debug log.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(
                    claim = %key,
                    error = %e,
                    "Custom claim dropped: value does not serialize"
                );
                return self;
            }
        };

        if key == "sub" {
            match value {
                serde_json::Value::String(sub) => self.sub = Some(sub),
                _ => tracing::debug!("Custom claim dropped: sub must be a string"),
            }
        } else if SERVER_CLAIMS.contains(&key.as_str()) {
            tracing::debug!(claim = %key, "Custom claim dropped: computed at issuance");
        } else {
            self.extra.insert(key, value);
        }

        self
    }

    /// Merge server-computed claims into a copy of these claims.
    ///
    /// `iat` is set to `issued_at` and `exp` to `issued_at + ttl`, replacing
    /// anything the caller supplied.
    ///
    /// # Arguments
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Validity duration
    ///
    /// # Returns
    /// Claims ready for signing
    pub fn stamped(&self, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let mut claims = self.clone();
        claims.iat = Some(issued_at.timestamp());
        claims.exp = Some((issued_at + ttl).timestamp());
        claims
    }

    /// Subject claim, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.is_empty())
    }

    /// Check if token is expired.
    ///
    /// Expiration is reached at the `exp` instant itself, compared at the full
    /// precision of `now`. Claims without a usable `exp` are treated as
    /// expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
            .map_or(true, |expires_at| now >= expires_at)
    }
}

//! JWT claims of a service-account assertion.

use serde::{Deserialize, Serialize};

/// Lifetime Google accepts for an assertion, in seconds.
pub const ASSERTION_TTL_SECONDS: i64 = 3600;

/// Claims signed with the service account key (RS256).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer: the service account email.
    pub iss: String,
    /// Space-separated OAuth2 scopes.
    pub scope: String,
    /// Audience: the token endpoint.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(email: &str, scopes: &[String], token_uri: &str, now: i64) -> Self {
        Self {
            iss: email.to_string(),
            scope: scopes.join(" "),
            aud: token_uri.to_string(),
            iat: now,
            exp: now + ASSERTION_TTL_SECONDS,
        }
    }
}

//! Access token claim set.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the per-token salt.
pub const SALT_LENGTH: usize = 64;

/// Claims carried by an access token.
///
/// Field order is the serialization order: `iss`, `exp`, `iat`, `salt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identity of the server that minted the token.
    pub iss: String,
    /// Expiration, seconds since the epoch.
    pub exp: i64,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Random per-token entropy.
    pub salt: String,
}

impl Claims {
    /// Claims issued at `issued_at` and valid for `ttl_seconds`, with a fresh salt.
    pub fn new(issuer: String, issued_at: i64, ttl_seconds: i64) -> Self {
        Claims {
            iss: issuer,
            exp: issued_at.saturating_add(ttl_seconds),
            iat: issued_at,
            salt: generate_salt(),
        }
    }

    /// Whether the token has expired at `timestamp`.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired_at(&self, timestamp: i64) -> bool {
        self.exp < timestamp
    }

    /// Exact issuer comparison, no normalization.
    pub fn is_issued_by(&self, issuer: &str) -> bool {
        self.iss == issuer
    }
}

/// Fresh alphanumeric salt from the thread-local CSPRNG.
pub fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LENGTH)
        .map(char::from)
        .collect()
}

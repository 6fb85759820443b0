//! Access token issuance and validation.
//!
//! [`TokenIssuer`] and [`TokenValidator`] are separate capabilities so a
//! caller that only checks tokens does not depend on minting them.
//! [`AccessTokenManager`] implements both over one key pair.

use crate::config::Config;
use crate::error::{Rejection, TokenError};
use crate::jwt::{Claims, ClaimsBuilder, JwtSerializer};
use crate::keys::{algorithm_name, SigningKeys};
use crate::metrics;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Mints signed access tokens.
pub trait TokenIssuer: Send + Sync {
    /// Issue a token valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Fails only if signing fails, which indicates broken key state.
    fn issue(&self) -> Result<String, TokenError>;
}

/// Checks presented access tokens.
pub trait TokenValidator: Send + Sync {
    /// Whether `token` is currently valid. Never reveals why it is not.
    fn validate(&self, token: &str) -> bool;
}

/// Issues and validates tokens bound to this server's identity.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct AccessTokenManager {
    issuer: String,
    token_ttl: Duration,
    keys: Arc<SigningKeys>,
    serializer: JwtSerializer,
}

impl AccessTokenManager {
    /// Create a manager with a freshly generated key pair.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::KeyGeneration`] if no key pair can be made.
    pub fn new(config: &Config) -> Result<Self, TokenError> {
        let keys = Arc::new(SigningKeys::generate(config.key_bits)?);
        Ok(Self::with_keys(config, keys))
    }

    /// Create a manager over an existing key pair.
    #[must_use]
    pub fn with_keys(config: &Config, keys: Arc<SigningKeys>) -> Self {
        info!(
            issuer = %config.issuer,
            ttl_secs = config.token_ttl.as_secs(),
            kid = %keys.key_id(),
            "Access token manager ready"
        );

        Self {
            issuer: config.issuer.clone(),
            token_ttl: config.token_ttl,
            serializer: JwtSerializer::new(Arc::clone(&keys)),
            keys,
        }
    }

    /// Identity written to and expected in `iss`.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Lifetime of issued tokens.
    #[must_use]
    pub const fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Key pair used for signing and verification.
    #[must_use]
    pub fn keys(&self) -> &SigningKeys {
        &self.keys
    }

    /// Issue a token with an explicit issued-at timestamp.
    ///
    /// # Errors
    ///
    /// Fails only if signing fails.
    pub fn issue_at(&self, issued_at: i64) -> Result<String, TokenError> {
        let claims = ClaimsBuilder::new(self.issuer.clone())
            .ttl(self.token_ttl)
            .issued_at(issued_at)
            .build();

        let token = self.serializer.serialize(&claims)?;

        let algorithm = algorithm_name(self.keys.algorithm());
        metrics::record_token_issued(&algorithm);
        debug!(exp = claims.exp, kid = %self.keys.key_id(), "Issued access token");
        Ok(token)
    }

    /// Validate `token` against the clock reading `now` (seconds since the epoch).
    pub fn validate_at(&self, token: &str, now: i64) -> bool {
        match self.inspect(token, now) {
            Ok(claims) => {
                metrics::record_validation("accepted");
                debug!(exp = claims.exp, "Access token accepted");
                true
            }
            Err(rejection) => {
                metrics::record_validation(rejection.metric_label());
                match &rejection {
                    Rejection::Expired { expired_at } => {
                        info!(expired_at, "Access token has expired");
                    }
                    Rejection::IssuerMismatch { issuer } => {
                        warn!(issuer = %issuer, "Incorrect access token issuer");
                    }
                    other => {
                        warn!(reason = %other, "Access token rejected");
                    }
                }
                false
            }
        }
    }

    /// Ordered trust decision: structure, algorithm and signature, then
    /// expiration, then issuer.
    fn inspect(&self, token: &str, now: i64) -> Result<Claims, Rejection> {
        let claims = self.serializer.deserialize(token)?;

        if claims.is_expired_at(now) {
            return Err(Rejection::Expired {
                expired_at: claims.exp,
            });
        }

        if !claims.is_issued_by(&self.issuer) {
            return Err(Rejection::IssuerMismatch { issuer: claims.iss });
        }

        Ok(claims)
    }
}

impl TokenIssuer for AccessTokenManager {
    fn issue(&self) -> Result<String, TokenError> {
        self.issue_at(chrono::Utc::now().timestamp())
    }
}

impl TokenValidator for AccessTokenManager {
    fn validate(&self, token: &str) -> bool {
        self.validate_at(token, chrono::Utc::now().timestamp())
    }
}

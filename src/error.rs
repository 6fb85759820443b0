//! Error types for the access token service.
//!
//! [`TokenError`] covers failures a caller has to deal with: startup
//! problems (configuration, key generation) and unexpected signing
//! failures. [`Rejection`] describes why a presented token was refused;
//! it only ever reaches logs and metrics, never the caller of
//! `validate`.

use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Fatal or unexpected errors raised by the service.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Signing key pair could not be generated.
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    /// A well-formed claim set could not be signed.
    #[error("Token signing error: {0}")]
    Signing(String),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenError {
    /// Create a key generation error.
    #[must_use]
    pub fn key_generation(msg: impl Into<String>) -> Self {
        Self::KeyGeneration(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(err.to_string())
    }
}

/// Reason a presented token failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Token is not a well-formed compact JWS or its claims do not parse.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Header declares an algorithm outside the whitelist.
    #[error("algorithm not allowed")]
    DisallowedAlgorithm,

    /// Signature does not match the payload under the service key.
    #[error("signature mismatch")]
    InvalidSignature,

    /// Token carries no expiration claim.
    #[error("expiration claim missing")]
    MissingExpiration,

    /// Expiration lies in the past.
    #[error("token expired at {expired_at}")]
    Expired {
        /// Expiration timestamp, seconds since the epoch.
        expired_at: i64,
    },

    /// Issuer claim does not match this server.
    #[error("incorrect issuer: {issuer}")]
    IssuerMismatch {
        /// Issuer found in the token.
        issuer: String,
    },
}

impl Rejection {
    /// Ordinary expiry, as opposed to input that looks malformed or forged.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// Label used for the validation outcome metric.
    #[must_use]
    pub const fn metric_label(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::DisallowedAlgorithm => "disallowed_algorithm",
            Self::InvalidSignature => "invalid_signature",
            Self::MissingExpiration => "missing_expiration",
            Self::Expired { .. } => "expired",
            Self::IssuerMismatch { .. } => "issuer_mismatch",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Rejection {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self::DisallowedAlgorithm,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::MissingRequiredClaim(claim) if claim == "exp" => Self::MissingExpiration,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TokenError::config("TOKEN_TTL_MINUTES must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: TOKEN_TTL_MINUTES must be positive"
        );
    }

    #[test]
    fn test_only_expiry_is_expired() {
        assert!(Rejection::Expired { expired_at: 0 }.is_expired());
        assert!(!Rejection::InvalidSignature.is_expired());
        assert!(!Rejection::MissingExpiration.is_expired());
        assert!(!Rejection::IssuerMismatch { issuer: "other".to_string() }.is_expired());
    }

    #[test]
    fn test_rejection_from_jwt_error_kind() {
        let err = jsonwebtoken::errors::Error::from(ErrorKind::InvalidAlgorithm);
        assert_eq!(Rejection::from(err), Rejection::DisallowedAlgorithm);

        let err = jsonwebtoken::errors::Error::from(ErrorKind::InvalidSignature);
        assert_eq!(Rejection::from(err), Rejection::InvalidSignature);

        let err = jsonwebtoken::errors::Error::from(ErrorKind::MissingRequiredClaim(
            "exp".to_string(),
        ));
        assert_eq!(Rejection::from(err), Rejection::MissingExpiration);

        let err = jsonwebtoken::errors::Error::from(ErrorKind::InvalidToken);
        assert!(matches!(Rejection::from(err), Rejection::Malformed(_)));
    }

    #[test]
    fn test_metric_labels_distinct() {
        let labels = [
            Rejection::Malformed(String::new()).metric_label(),
            Rejection::DisallowedAlgorithm.metric_label(),
            Rejection::InvalidSignature.metric_label(),
            Rejection::MissingExpiration.metric_label(),
            Rejection::Expired { expired_at: 0 }.metric_label(),
            Rejection::IssuerMismatch { issuer: String::new() }.metric_label(),
        ];
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
    }
}

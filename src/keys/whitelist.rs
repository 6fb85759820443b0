//! Algorithm allow-list enforced during verification.

use jsonwebtoken::{Algorithm, Validation};

/// Allow-list of signature algorithms accepted by the validator.
///
/// Holds exactly one algorithm. The [`Validation`] it builds is the only
/// way the service verifies tokens, so a header naming any other
/// algorithm is refused before its signature is looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmWhitelist {
    allowed: [Algorithm; 1],
}

impl AlgorithmWhitelist {
    /// Allow-list containing only `algorithm`.
    #[must_use]
    pub const fn single(algorithm: Algorithm) -> Self {
        Self {
            allowed: [algorithm],
        }
    }

    /// The algorithm used for signing.
    #[must_use]
    pub const fn primary(&self) -> Algorithm {
        self.allowed[0]
    }

    /// All permitted algorithms.
    #[must_use]
    pub fn algorithms(&self) -> &[Algorithm] {
        &self.allowed
    }

    /// Whether `algorithm` is permitted.
    #[must_use]
    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.allowed.contains(&algorithm)
    }

    /// Verifier settings pinned to this allow-list.
    ///
    /// `exp` is required to be present. Expiration and issuer are left to
    /// the caller, which checks them against its own clock and identity.
    #[must_use]
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.primary());
        validation.algorithms = self.allowed.to_vec();
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl Default for AlgorithmWhitelist {
    fn default() -> Self {
        Self::single(Algorithm::RS256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rs256_only() {
        let whitelist = AlgorithmWhitelist::default();
        assert_eq!(whitelist.algorithms(), &[Algorithm::RS256]);
        assert!(whitelist.contains(Algorithm::RS256));
        assert!(!whitelist.contains(Algorithm::RS512));
        assert!(!whitelist.contains(Algorithm::HS256));
        assert!(!whitelist.contains(Algorithm::PS256));
    }

    #[test]
    fn test_validation_pinned() {
        let validation = AlgorithmWhitelist::default().validation();
        assert_eq!(validation.algorithms, vec![Algorithm::RS256]);
        assert_eq!(validation.leeway, 0);
        assert!(!validation.validate_exp);
        assert!(!validation.validate_aud);
        assert!(validation.required_spec_claims.contains("exp"));
        assert!(validation.iss.is_none());
    }
}

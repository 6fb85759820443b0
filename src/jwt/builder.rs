//! Builder for [`Claims`].

use crate::jwt::claims::Claims;
use std::time::Duration;

/// Assembles claims for one token.
pub struct ClaimsBuilder {
    issuer: String,
    ttl: Duration,
    issued_at: Option<i64>,
}

impl ClaimsBuilder {
    /// Start from `issuer` with a five minute lifetime.
    pub fn new(issuer: String) -> Self {
        ClaimsBuilder {
            issuer,
            ttl: Duration::from_secs(300),
            issued_at: None,
        }
    }

    /// Token lifetime.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Pin issued-at instead of reading the clock.
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.issued_at = Some(timestamp);
        self
    }

    /// Builds claims with a fresh salt. Sub-second TTL remainders are dropped.
    pub fn build(self) -> Claims {
        let issued_at = self
            .issued_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        let ttl_seconds = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        Claims::new(self.issuer, issued_at, ttl_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let claims = ClaimsBuilder::new("server-1".to_string())
            .ttl(Duration::from_secs(3600))
            .issued_at(1000)
            .build();

        assert_eq!(claims.iss, "server-1");
        assert_eq!(claims.iat, 1000);
        assert_eq!(claims.exp, 4600);
    }

    #[test]
    fn test_builder_defaults() {
        let before = chrono::Utc::now().timestamp();
        let claims = ClaimsBuilder::new("server-1".to_string()).build();
        let after = chrono::Utc::now().timestamp();

        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_fractional_ttl_truncated() {
        let claims = ClaimsBuilder::new("server-1".to_string())
            .ttl(Duration::from_secs_f64(90.9))
            .issued_at(0)
            .build();

        assert_eq!(claims.exp, 90);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let claims = ClaimsBuilder::new("server-1".to_string())
            .ttl(Duration::MAX)
            .issued_at(1)
            .build();

        assert_eq!(claims.exp, i64::MAX);
    }
}

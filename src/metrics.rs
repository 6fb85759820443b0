//! Prometheus metrics for the access token service.
//!
//! Validation outcomes are recorded by reason here and in the logs only;
//! callers of `validate` see a plain boolean.

use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, IntCounterVec};

/// Tokens issued counter.
pub static TOKENS_ISSUED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "access_token_issued_total",
        "Total number of access tokens issued",
        &["algorithm"]
    )
    .expect("Failed to register access_token_issued metric")
});

/// Token validations counter.
pub static TOKEN_VALIDATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "access_token_validations_total",
        "Total number of access token validations by outcome",
        &["outcome"]
    )
    .expect("Failed to register access_token_validations metric")
});

/// Record a token issuance.
pub fn record_token_issued(algorithm: &str) {
    TOKENS_ISSUED.with_label_values(&[algorithm]).inc();
}

/// Record a validation outcome (`accepted` or a rejection label).
pub fn record_validation(outcome: &str) {
    TOKEN_VALIDATIONS.with_label_values(&[outcome]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_token_issued() {
        record_token_issued("RS256");
        let value = TOKENS_ISSUED.with_label_values(&["RS256"]).get();
        assert!(value > 0);
    }

    #[test]
    fn test_record_validation() {
        record_validation("expired");
        let value = TOKEN_VALIDATIONS.with_label_values(&["expired"]).get();
        assert!(value > 0);
    }
}

//! Centralized configuration for the access token service.
//!
//! Configuration is loaded from environment variables (and an optional
//! `.env` file) and validated at startup.

use crate::error::TokenError;
use crate::telemetry::TracingConfig;
use std::env;
use std::time::Duration;
use tracing::warn;

/// Default token lifetime in minutes.
pub const DEFAULT_TTL_IN_MINUTES: f64 = 5.0;

/// Shortest token lifetime; expiry has whole-second resolution.
pub const MIN_TTL_SECONDS: f64 = 1.0;

/// Default and minimum RSA modulus size.
pub const RSA_KEY_LENGTH: usize = 2048;

/// Access token service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stable identity of this server, written to and checked against `iss`
    pub issuer: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// RSA key size in bits
    pub key_bits: usize,
    /// Logging setup
    pub tracing: TracingConfig,
}

impl Config {
    /// Create a configuration for the given issuer with default settings.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            token_ttl: Duration::from_secs(300),
            key_bits: RSA_KEY_LENGTH,
            tracing: TracingConfig::default().with_service_name("access-token-service"),
        }
    }

    /// Set the token lifetime in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error unless `minutes` is finite and at least one second.
    pub fn with_token_ttl_minutes(mut self, minutes: f64) -> Result<Self, TokenError> {
        self.token_ttl = ttl_from_minutes(minutes)?;
        Ok(self)
    }

    /// Set the RSA key size.
    ///
    /// # Errors
    ///
    /// Returns an error for key sizes below 2048 bits.
    pub fn with_key_bits(mut self, bits: usize) -> Result<Self, TokenError> {
        self.key_bits = check_key_bits(bits)?;
        Ok(self)
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, TokenError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TokenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let issuer = match lookup("SERVER_ID").filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                warn!(issuer = %id, "SERVER_ID not set, using a random server identity");
                id
            }
        };

        let token_ttl = ttl_from_minutes(parse_var(
            &lookup,
            "TOKEN_TTL_MINUTES",
            DEFAULT_TTL_IN_MINUTES,
        )?)?;
        let key_bits = check_key_bits(parse_var(&lookup, "RSA_KEY_BITS", RSA_KEY_LENGTH)?)?;

        let mut tracing = TracingConfig::default()
            .with_service_name("access-token-service")
            .with_log_level(lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()));
        if parse_var(&lookup, "LOG_JSON", false)? {
            tracing = tracing.with_json_output();
        }

        Ok(Self {
            issuer,
            token_ttl,
            key_bits,
            tracing,
        })
    }
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, TokenError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e| TokenError::config(format!("Invalid {}: {}", name, e))),
        None => Ok(default),
    }
}

fn ttl_from_minutes(minutes: f64) -> Result<Duration, TokenError> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(TokenError::config(format!(
            "TOKEN_TTL_MINUTES must be a positive number, got {}",
            minutes
        )));
    }
    let seconds = minutes * 60.0;
    if seconds < MIN_TTL_SECONDS {
        return Err(TokenError::config(format!(
            "TOKEN_TTL_MINUTES must cover at least one second, got {}",
            minutes
        )));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| TokenError::config(format!("Invalid TOKEN_TTL_MINUTES: {}", e)))
}

fn check_key_bits(bits: usize) -> Result<usize, TokenError> {
    if bits < RSA_KEY_LENGTH {
        return Err(TokenError::config(format!(
            "RSA_KEY_BITS must be at least {}, got {}",
            RSA_KEY_LENGTH, bits
        )));
    }
    Ok(bits)
}

//! Access Token Service library.
//!
//! Mints short-lived RS256 tokens bound to this server's identity and
//! validates presented tokens against it. A token is accepted only if
//! its algorithm is whitelisted, its signature verifies under the
//! process key pair, it has not expired, and its issuer matches.
//!
//! ```no_run
//! use access_token_service::{AccessTokenManager, Config, TokenIssuer, TokenValidator};
//!
//! # fn main() -> Result<(), access_token_service::TokenError> {
//! let config = Config::from_env()?;
//! let manager = AccessTokenManager::new(&config)?;
//!
//! let token = manager.issue()?;
//! assert!(manager.validate(&token));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod jwt;
pub mod keys;
pub mod metrics;
pub mod service;
pub mod telemetry;

// Re-exports for convenience
pub use config::Config;
pub use error::{Rejection, TokenError};
pub use service::{AccessTokenManager, TokenIssuer, TokenValidator};

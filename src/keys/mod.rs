//! Key and algorithm context.
//!
//! Owns the RSA signing key pair and the algorithm allow-list used by the
//! token service for its whole lifetime.

pub mod jwk;
pub mod signing;
pub mod whitelist;

pub use jwk::{rsa_thumbprint, Jwk};
pub use signing::{algorithm_name, SigningKeys};
pub use whitelist::AlgorithmWhitelist;

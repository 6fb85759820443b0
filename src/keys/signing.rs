//! Process-lifetime RSA signing key pair.

use super::jwk::{rsa_thumbprint, Jwk};
use super::whitelist::AlgorithmWhitelist;
use crate::config::RSA_KEY_LENGTH;
use crate::error::TokenError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// RSA key pair and algorithm allow-list owned by one token manager.
///
/// Generated once and never mutated. The private half is only reachable
/// through `encoding_key`, which is crate-private.
pub struct SigningKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_key_der: Vec<u8>,
    jwk: Jwk,
    bits: usize,
    whitelist: AlgorithmWhitelist,
}

impl SigningKeys {
    /// Generate a fresh key pair of the given strength.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::KeyGeneration`] for keys below 2048 bits or
    /// when generation or encoding fails. The service cannot run without
    /// a key, so callers treat this as a startup failure.
    pub fn generate(bits: usize) -> Result<Self, TokenError> {
        if bits < RSA_KEY_LENGTH {
            return Err(TokenError::key_generation(format!(
                "RSA key must be at least {} bits, requested {}",
                RSA_KEY_LENGTH, bits
            )));
        }

        let started = Instant::now();
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), bits)
            .map_err(|e| TokenError::key_generation(e.to_string()))?;
        let public_key = private_key.to_public_key();

        let private_der = private_key
            .to_pkcs1_der()
            .map_err(|e| TokenError::key_generation(e.to_string()))?;
        let public_der = public_key
            .to_pkcs1_der()
            .map_err(|e| TokenError::key_generation(e.to_string()))?;

        let whitelist = AlgorithmWhitelist::default();
        let n = URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be());
        let e = URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be());
        let jwk = Jwk {
            kty: "RSA".to_string(),
            kid: rsa_thumbprint(&n, &e),
            key_use: "sig".to_string(),
            alg: algorithm_name(whitelist.primary()),
            n,
            e,
        };

        info!(
            kid = %jwk.kid,
            bits,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated signing key pair"
        );

        Ok(Self {
            encoding_key: EncodingKey::from_rsa_der(private_der.as_bytes()),
            decoding_key: DecodingKey::from_rsa_der(public_der.as_bytes()),
            public_key_der: public_der.as_bytes().to_vec(),
            jwk,
            bits,
            whitelist,
        })
    }

    /// The single-entry algorithm allow-list.
    #[must_use]
    pub const fn algorithm_whitelist(&self) -> &AlgorithmWhitelist {
        &self.whitelist
    }

    /// Signing algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.whitelist.primary()
    }

    /// Key ID placed in token headers.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.jwk.kid
    }

    /// Modulus size in bits.
    #[must_use]
    pub const fn bits(&self) -> usize {
        self.bits
    }

    /// Public key as a JWK, for hosts that publish it.
    #[must_use]
    pub const fn public_jwk(&self) -> &Jwk {
        &self.jwk
    }

    /// Public key as PKCS#1 DER.
    #[must_use]
    pub fn public_key_der(&self) -> &[u8] {
        &self.public_key_der
    }

    pub(crate) const fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) const fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeys")
            .field("kid", &self.jwk.kid)
            .field("bits", &self.bits)
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

/// Algorithm name as written in the `alg` header.
#[must_use]
pub fn algorithm_name(algorithm: Algorithm) -> String {
    format!("{:?}", algorithm)
}

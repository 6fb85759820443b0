//! Compact JWS encoding and verification.

use crate::error::{Rejection, TokenError};
use crate::jwt::claims::Claims;
use crate::keys::SigningKeys;
use jsonwebtoken::{decode, encode, Header, Validation};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Compact JWS codec bound to one key pair.
#[derive(Debug)]
pub struct JwtSerializer {
    keys: Arc<SigningKeys>,
    validation: Validation,
}

impl JwtSerializer {
    /// Codec pinned to the whitelist of `keys`.
    pub fn new(keys: Arc<SigningKeys>) -> Self {
        let validation = keys.algorithm_whitelist().validation();
        JwtSerializer { keys, validation }
    }

    /// Signs `claims` into `header.payload.signature`.
    pub fn serialize(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(self.keys.algorithm());
        header.kid = Some(self.keys.key_id().to_string());

        encode(&header, claims, self.keys.encoding_key()).map_err(TokenError::from)
    }

    /// Verifies structure, algorithm and signature, and requires `exp`.
    ///
    /// Expiration time and issuer are not checked here.
    pub fn deserialize(&self, token: &str) -> Result<Claims, Rejection> {
        // Decoded as a map so that a missing `exp` surfaces as such rather
        // than as a claims parse failure.
        let token_data =
            decode::<Map<String, Value>>(token, self.keys.decoding_key(), &self.validation)?;

        serde_json::from_value(Value::Object(token_data.claims))
            .map_err(|e| Rejection::Malformed(e.to_string()))
    }
}

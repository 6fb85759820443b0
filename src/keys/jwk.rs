//! Public JWK representation and RFC 7638 thumbprint.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Public half of the signing key as a JSON Web Key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always `RSA`
    pub kty: String,
    /// Key ID (the thumbprint)
    pub kid: String,
    /// Key use
    #[serde(rename = "use")]
    pub key_use: String,
    /// Algorithm
    pub alg: String,
    /// RSA modulus, base64url
    pub n: String,
    /// RSA public exponent, base64url
    pub e: String,
}

impl Jwk {
    /// Serialize to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Computes the SHA-256 JWK thumbprint of an RSA public key.
///
/// Per RFC 7638 the hash covers the required members `e`, `kty`, `n`
/// in lexicographic order with no whitespace.
#[must_use]
pub fn rsa_thumbprint(n: &str, e: &str) -> String {
    let canonical = format!(r#"{{"e":"{}","kty":"RSA","n":"{}"}}"#, e, n);
    URL_SAFE_NO_PAD.encode(Sha256::digest(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc7638_example() {
        // Example key from RFC 7638, section 3.1.
        let n = "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw";
        let e = "AQAB";

        assert_eq!(
            rsa_thumbprint(n, e),
            "NzbLsXh8uDCcd-6MNwXF4W_7noWXFZAfHkxZsRGC9Xs"
        );
    }

    #[test]
    fn test_thumbprint_depends_on_key() {
        assert_ne!(rsa_thumbprint("AAAA", "AQAB"), rsa_thumbprint("AAAB", "AQAB"));
        assert_eq!(rsa_thumbprint("AAAA", "AQAB"), rsa_thumbprint("AAAA", "AQAB"));
    }

    #[test]
    fn test_jwk_json_uses_use_member() {
        let jwk = Jwk {
            kty: "RSA".to_string(),
            kid: "kid-1".to_string(),
            key_use: "sig".to_string(),
            alg: "RS256".to_string(),
            n: "AAAA".to_string(),
            e: "AQAB".to_string(),
        };

        let json: serde_json::Value = serde_json::from_str(&jwk.to_json()).unwrap();
        assert_eq!(json["use"], "sig");
        assert_eq!(json["kty"], "RSA");
        assert!(json.get("key_use").is_none());
    }
}

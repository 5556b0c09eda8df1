//! JWT encoding and decoding for one token kind.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::TokenError;

/// Algorithms accepted when decoding. Anything outside the HMAC family is
/// rejected before the signature is checked.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Signs and verifies tokens of a single kind with its own secret
pub struct TokenCodec {
    kind: TokenKind,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str, kind: TokenKind, issuer: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // Expiry is judged against the injected clock in `decode`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Self {
            kind,
            issuer: issuer.into(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Signs claims with HS256
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            TokenError::IssuanceFailed {
                message: e.to_string(),
            }
        })
    }

    /// Verifies the signature, kind and issuer, then rejects the token if `now >= exp`
    pub fn decode(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = self.decode_allow_expired(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Like [`decode`](Self::decode) but accepts an elapsed `exp`
    pub fn decode_allow_expired(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| map_decode_error(e.kind()))?;
        let claims = data.claims;

        if claims.kind != self.kind || claims.iss != self.issuer {
            return Err(TokenError::Malformed);
        }
        Ok(claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("kind", &self.kind)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

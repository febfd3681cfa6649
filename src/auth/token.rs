use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::policy::Role;
use super::AuthError;

/// Claims carried by a session token. The role is resolved once at
/// login (by which table matched the email) and trusted for the
/// token's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id.
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// An authenticated caller, decoded from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Signs and verifies session tokens with a process-wide secret fixed
/// at startup. Tokens are self-contained: there is no revocation list,
/// expiry is the only invalidation.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Mint a signed token for the given principal.
    pub fn issue(&self, id: i64, email: &str, role: Role) -> Result<String, AuthError> {
        let claims = Claims {
            sub: id,
            email: email.to_string(),
            role,
            exp: chrono::Utc::now().timestamp() + self.ttl_secs,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Validate signature and expiry. Bad signature, garbage input and
    /// expired tokens are all the same failure to the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }
}

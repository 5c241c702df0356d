//! Identity provider adapter.
//!
//! The hosted provider owns credentials and token issuance; this system only
//! verifies the bearer JWTs it signs. `AuthVerifier` keeps the concrete
//! provider swappable so tests can simulate expiry and invalid tokens.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;

/// An authenticated identity as asserted by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Provider subject id; doubles as the application user id.
    pub id: Uuid,
    pub email: String,
}

/// Claims carried by provider-issued JWTs.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token verification trait for dependency injection.
pub trait AuthVerifier: Send + Sync {
    /// Verify a bearer token and return the principal it asserts.
    fn verify(&self, token: &str) -> AppResult<Principal>;
}

/// Verifies provider JWTs locally against the shared signing secret.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
}

impl JwtVerifier {
    pub fn new(config: &Config) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.auth_jwt_secret_bytes()),
        }
    }
}

impl AuthVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> AppResult<Principal> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(Principal {
            id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(claims: &Claims) -> String {
        let config = Config::for_tests();
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.auth_jwt_secret_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_principal() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let token = issue(&Claims {
            sub: id,
            email: "student@university.edu".to_string(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
        });

        let verifier = JwtVerifier::new(&Config::for_tests());
        let principal = verifier.verify(&token).unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.email, "student@university.edu");
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let token = issue(&Claims {
            sub: Uuid::new_v4(),
            email: "student@university.edu".to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        });

        let verifier = JwtVerifier::new(&Config::for_tests());
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let verifier = JwtVerifier::new(&Config::for_tests());
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}

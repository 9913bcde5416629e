use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::dto::auth::AuthToken;
use uuid::Uuid;

/// Bearer token claims: the principal id and issue time. Tokens carry no
/// expiry and validation does not demand one — see DESIGN.md before
/// changing either side.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: u64,
}

/// HS256 signer/verifier shared by user and admin principals.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, principal_id: Uuid) -> Result<AuthToken, jsonwebtoken::errors::Error> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let claims = Claims {
            sub: principal_id,
            iat,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(AuthToken { access_token })
    }

    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let issuer = TokenIssuer::new("test-secret");
        let id = Uuid::new_v4();

        let token = issuer.issue(id).unwrap();
        let claims = issuer.decode(&token.access_token).unwrap();

        assert_eq!(claims.sub, id);
    }

    #[test]
    fn token_without_expiry_still_validates() {
        let issuer = TokenIssuer::new("test-secret");

        let token = issuer.issue(Uuid::new_v4()).unwrap();

        // decode would fail here if the validator demanded an exp claim
        assert!(issuer.decode(&token.access_token).is_ok());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = TokenIssuer::new("test-secret");
        let other = TokenIssuer::new("other-secret");

        let token = other.issue(Uuid::new_v4()).unwrap();

        assert!(issuer.decode(&token.access_token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret");

        assert!(issuer.decode("not-a-jwt").is_err());
    }
}

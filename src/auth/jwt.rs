use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;

use crate::config::jwt::JwtSettings;
use crate::error::ApiError;
use crate::models::user::TokenClaims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub uid: String,
    pub email: Option<String>,
}

/// Identity provider seam: turns a bearer token into a user id.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, ApiError>;
}

/// Validates HS256 identity tokens signed with the configured secret key.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = settings.leeway_seconds;
        Self {
            decoding_key: DecodingKey::from_secret(settings.secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, ApiError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::warn!("Failed to decode token: {:?}", e);
                ApiError::auth(format!("Invalid token: {}", e))
            })?;

        let claims = token_data.claims;
        let uid = claims
            .user_id
            .filter(|uid| !uid.is_empty())
            .unwrap_or(claims.sub);
        if uid.is_empty() {
            return Err(ApiError::auth("Invalid token: missing subject"));
        }

        Ok(VerifiedToken {
            uid,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn verifier() -> JwtTokenVerifier {
        JwtTokenVerifier::new(&JwtSettings::new(SECRET.to_string(), 0))
    }

    fn token(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, expires_in: Duration) -> TokenClaims {
        TokenClaims {
            sub: sub.to_string(),
            exp: (Utc::now() + expires_in).timestamp() as usize,
            iat: Some(Utc::now().timestamp() as usize),
            user_id: None,
            email: Some("kim@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_valid_token() {
        let verified = verifier()
            .verify(&token(&claims("uid-1", Duration::hours(1)), SECRET))
            .await
            .unwrap();
        assert_eq!(verified.uid, "uid-1");
        assert_eq!(verified.email.as_deref(), Some("kim@example.com"));
    }

    #[tokio::test]
    async fn test_user_id_claim_wins_over_subject() {
        let mut claims = claims("subject", Duration::hours(1));
        claims.user_id = Some("uid-7".to_string());
        let verified = verifier().verify(&token(&claims, SECRET)).await.unwrap();
        assert_eq!(verified.uid, "uid-7");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let result = verifier()
            .verify(&token(&claims("uid-1", Duration::hours(-2)), SECRET))
            .await;
        assert!(matches!(result, Err(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_wrong_signature_is_rejected() {
        let result = verifier()
            .verify(&token(&claims("uid-1", Duration::hours(1)), "other-secret"))
            .await;
        assert!(matches!(result, Err(ApiError::Auth(_))));

        let garbage = verifier().verify("not-a-jwt").await;
        assert!(matches!(garbage, Err(ApiError::Auth(_))));
    }
}

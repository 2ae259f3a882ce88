//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use recipehub_core::config::auth::AuthConfig;
use recipehub_core::error::AppError;

use super::claims::Claims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string, checking signature
    /// and expiration.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::authentication(format!("Invalid token: {e}")))?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use recipehub_entity::user::UserRole;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        let user_id = Uuid::new_v4();

        let issued = encoder
            .generate_token(user_id, UserRole::User, "alice")
            .unwrap();
        let claims = decoder.decode_access_token(&issued.access_token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let encoder = JwtEncoder::new(&config());
        let other = AuthConfig {
            jwt_secret: "other-secret".to_string(),
            ..Default::default()
        };
        let decoder = JwtDecoder::new(&other);

        let issued = encoder
            .generate_token(Uuid::new_v4(), UserRole::User, "alice")
            .unwrap();
        assert!(decoder.decode_access_token(&issued.access_token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        let decoder = JwtDecoder::new(&config());
        assert!(decoder.decode_access_token("not-a-token").is_err());
    }
}

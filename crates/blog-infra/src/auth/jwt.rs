//! JWT token service implementation (HS256).

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use blog_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 72,
            issuer: "blog-backend".to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// Wire format of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    username: String,
    iat: i64,
    exp: i64,
    iss: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    fn issue_at(
        &self,
        user_id: i32,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let exp = issued_at + TimeDelta::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::MalformedToken(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: i32, username: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, username, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        // Expired means past `exp`, with no grace period.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    _ => AuthError::MalformedToken(e.to_string()),
                }
            })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|e| AuthError::MalformedToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            username: token_data.claims.username,
            issued_at: token_data.claims.iat,
            expires_at: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let service = JwtTokenService::new(test_config());

        let token = service.issue(7, "alice").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.expires_at - claims.issued_at, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtTokenService::new(test_config());
        let issued_at = Utc::now() - TimeDelta::hours(3);

        let token = service.issue_at(7, "alice", issued_at).unwrap();

        assert!(matches!(
            service.verify(&token).unwrap_err(),
            AuthError::TokenExpired
        ));
    }

    #[test]
    fn test_token_is_rejected_just_after_expiry() {
        let service = JwtTokenService::new(test_config());
        // ttl is one hour, so this token expired 30 seconds ago.
        let issued_at = Utc::now() - TimeDelta::hours(1) - TimeDelta::seconds(30);

        let token = service.issue_at(7, "alice", issued_at).unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtTokenService::new(test_config());
        let verifier = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = issuer.issue(7, "alice").unwrap();

        assert!(matches!(
            verifier.verify(&token).unwrap_err(),
            AuthError::InvalidSignature
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = JwtTokenService::new(test_config());

        let result = service.verify("invalid-token");

        assert!(matches!(result.unwrap_err(), AuthError::MalformedToken(_)));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let service1 = JwtTokenService::new(test_config());
        let service2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1.issue(1, "alice").unwrap();

        assert!(service2.verify(&token).is_err());
    }

    #[test]
    fn test_expiration_seconds() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: 72,
            ..test_config()
        });

        assert_eq!(service.expiration_seconds(), 259_200);
    }
}

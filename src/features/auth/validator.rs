use super::model::{AccessClaims, AuthenticatedUser};
use super::policy::PrivilegePolicy;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

/// Validates HS256 access tokens and turns their claims into an [`AuthenticatedUser`].
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    policy: PrivilegePolicy,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig, policy: PrivilegePolicy) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();
        validation.validate_aud = false;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "iss"]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            policy,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?
            .claims;

        let member_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Token subject is not a member id".to_string()))?;

        let display_name = claims
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| claims.sub.clone());

        let privileged = self.policy.is_privileged(&claims.role);

        Ok(AuthenticatedUser {
            member_id,
            display_name,
            role: claims.role,
            privileged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::Duration;

    const SECRET: &str = "test-secret";

    fn config(issuer: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: issuer.map(str::to_string),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn token(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token encodes")
    }

    fn claims(role: &str) -> AccessClaims {
        AccessClaims {
            sub: Uuid::new_v4().to_string(),
            name: Some("Maria Souza".to_string()),
            role: role.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as u64,
            iss: None,
        }
    }

    #[test]
    fn test_admin_token_is_privileged() {
        let validator = JwtValidator::new(&config(None), PrivilegePolicy::new(["ADMIN"]));
        let claims = claims("ADMIN");

        let user = validator
            .validate_token(&token(&claims, SECRET))
            .expect("valid token");

        assert_eq!(user.member_id.to_string(), claims.sub);
        assert_eq!(user.display_name, "Maria Souza");
        assert!(user.privileged);
    }

    #[test]
    fn test_member_token_is_not_privileged() {
        let validator = JwtValidator::new(&config(None), PrivilegePolicy::new(["ADMIN"]));

        let user = validator
            .validate_token(&token(&claims("COLIH"), SECRET))
            .expect("valid token");

        assert!(!user.privileged);
        assert_eq!(user.role, "COLIH");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let validator = JwtValidator::new(&config(None), PrivilegePolicy::new(["ADMIN"]));

        let result = validator.validate_token(&token(&claims("ADMIN"), "other-secret"));

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let validator = JwtValidator::new(&config(None), PrivilegePolicy::new(["ADMIN"]));
        let mut claims = claims("ADMIN");
        claims.exp = (chrono::Utc::now().timestamp() - 3600) as u64;

        assert!(validator.validate_token(&token(&claims, SECRET)).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let validator = JwtValidator::new(&config(None), PrivilegePolicy::new(["ADMIN"]));
        let mut claims = claims("ADMIN");
        claims.sub = "not-a-uuid".to_string();

        assert!(validator.validate_token(&token(&claims, SECRET)).is_err());
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let validator = JwtValidator::new(
            &config(Some("https://id.colih.example")),
            PrivilegePolicy::new(["ADMIN"]),
        );
        let mut claims = claims("ADMIN");

        assert!(validator.validate_token(&token(&claims, SECRET)).is_err());

        claims.iss = Some("https://id.colih.example".to_string());
        assert!(validator.validate_token(&token(&claims, SECRET)).is_ok());
    }

    #[test]
    fn test_missing_name_falls_back_to_subject() {
        let validator = JwtValidator::new(&config(None), PrivilegePolicy::new(["ADMIN"]));
        let mut claims = claims("COLIH");
        claims.name = None;

        let user = validator
            .validate_token(&token(&claims, SECRET))
            .expect("valid token");

        assert_eq!(user.display_name, claims.sub);
    }
}

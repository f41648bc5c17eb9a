//! Authentication service: bearer token validation and issuing.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// JWT claims identifying the acting user and their organization.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "organizationID")]
    pub organization_id: i64,
    /// Checked only when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: i64,
}

/// Already-authenticated (user, organization) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub organization_id: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            organization_id: claims.organization_id,
        }
    }
}

/// Issue an HS256 token for `principal` valid for `expiry_secs`.
pub fn issue_token(
    principal: &Principal,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        user_id: principal.user_id,
        organization_id: principal.organization_id,
        exp: Some((now + Duration::seconds(expiry_secs)).timestamp()),
        iat: now.timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Validate an HMAC-signed JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-jwt";

    #[test]
    fn token_issue_and_validation() {
        let principal = Principal {
            user_id: 3,
            organization_id: 7,
        };
        let token = issue_token(&principal, SECRET, 900).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.user_id, 3);
        assert_eq!(claims.organization_id, 7);
        assert_eq!(Principal::from(claims), principal);
    }

    #[test]
    fn invalid_token_rejected() {
        let result = validate_token("garbage.token.here", SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_secret_rejected() {
        let principal = Principal {
            user_id: 1,
            organization_id: 1,
        };
        let token = issue_token(&principal, SECRET, 900).unwrap();
        assert!(validate_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let principal = Principal {
            user_id: 1,
            organization_id: 1,
        };
        // Well beyond the 60s leeway window
        let token = issue_token(&principal, SECRET, -3600).unwrap();
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn token_without_expiry_accepted() {
        #[derive(Serialize)]
        struct NoExpiry {
            #[serde(rename = "userID")]
            user_id: i64,
            #[serde(rename = "organizationID")]
            organization_id: i64,
        }
        let token = jsonwebtoken::encode(
            &Header::default(),
            &NoExpiry {
                user_id: 1,
                organization_id: 2,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(
            Principal::from(claims),
            Principal {
                user_id: 1,
                organization_id: 2,
            }
        );
    }

    #[test]
    fn token_without_organization_rejected() {
        #[derive(Serialize)]
        struct Partial {
            #[serde(rename = "userID")]
            user_id: i64,
            exp: i64,
        }
        let token = jsonwebtoken::encode(
            &Header::default(),
            &Partial {
                user_id: 1,
                exp: (Utc::now() + Duration::seconds(900)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(validate_token(&token, SECRET).is_err());
    }
}

//! User (employee) model, JWT claims and permission rules

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    #[schema(write_only)]
    pub password: String,
    pub phone_number: Option<String>,
    pub is_admin: bool,
}

impl User {
    /// Self-or-admin rule: acting on one's own record is always permitted,
    /// acting on another user's record requires admin.
    pub fn can_modify(&self, target_user_id: i32) -> bool {
        self.id == target_user_id || self.is_admin
    }

    pub fn require_self_or_admin(&self, target_user_id: i32) -> Result<(), AppError> {
        if self.can_modify(target_user_id) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied("Not enough permissions".to_string()))
        }
    }

    /// The `is_admin` value that may actually be persisted on update.
    /// A non-admin asking for admin is downgraded, not rejected.
    pub fn effective_admin_flag(&self, requested: bool) -> bool {
        self.is_admin && requested
    }
}

/// Short user representation embedded in rental responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserShort {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserShort {
    fn from(user: User) -> Self {
        UserShort {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// User create/replace request (PUT replaces every mutable field)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    #[validate(length(max = 11, message = "Phone number must be at most 11 characters"))]
    pub phone_number: Option<String>,
    pub is_admin: bool,
}

/// User list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject: the user's email
    pub sub: String,
    pub user_id: i32,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(
        &self,
        secret: &str,
        algorithm: Algorithm,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::new(algorithm),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token; signature, expiry and the presence of
    /// every claim are all checked here.
    pub fn from_token(
        token: &str,
        secret: &str,
        algorithm: Algorithm,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(algorithm),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "test-secret";

    fn user(id: i32, is_admin: bool) -> User {
        User {
            id,
            name: "Matheus".to_string(),
            email: "matheus@email.com".to_string(),
            password: "hashed".to_string(),
            phone_number: Some("12345678910".to_string()),
            is_admin,
        }
    }

    fn claims(exp_offset: i64) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "matheus@email.com".to_string(),
            user_id: 1,
            is_admin: false,
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[test]
    fn token_round_trip() {
        let claims = claims(3600);
        let token = claims.create_token(SECRET, Algorithm::HS256).unwrap();
        let parsed = UserClaims::from_token(&token, SECRET, Algorithm::HS256).unwrap();
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.user_id, 1);
        assert!(!parsed.is_admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = claims(-3600).create_token(SECRET, Algorithm::HS256).unwrap();
        assert!(UserClaims::from_token(&token, SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = claims(3600).create_token(SECRET, Algorithm::HS256).unwrap();
        assert!(UserClaims::from_token(&token, "other-secret", Algorithm::HS256).is_err());
    }

    #[test]
    fn token_without_subject_is_rejected() {
        use jsonwebtoken::{encode, EncodingKey, Header};
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "user_id": 1,
            "is_admin": false,
            "exp": now + 3600,
            "iat": now,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(UserClaims::from_token(&token, SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn self_modification_is_always_permitted() {
        assert!(user(1, false).require_self_or_admin(1).is_ok());
        assert!(user(1, true).require_self_or_admin(1).is_ok());
    }

    #[test]
    fn cross_user_modification_requires_admin() {
        assert!(user(1, true).require_self_or_admin(2).is_ok());
        let err = user(1, false).require_self_or_admin(2).unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(msg) if msg == "Not enough permissions"));
    }

    #[test]
    fn non_admin_cannot_self_grant_admin() {
        assert!(!user(1, false).effective_admin_flag(true));
        assert!(!user(1, false).effective_admin_flag(false));
    }

    #[test]
    fn admin_keeps_the_requested_flag() {
        assert!(user(1, true).effective_admin_flag(true));
        assert!(!user(1, true).effective_admin_flag(false));
    }
}

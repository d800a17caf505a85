//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::Algorithm;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{User, UserClaims, UserInput, UserQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
    algorithm: Algorithm,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> AppResult<Self> {
        let algorithm = config.jwt_algorithm.parse::<Algorithm>().map_err(|_| {
            AppError::Internal(format!(
                "Unsupported JWT algorithm: {}",
                config.jwt_algorithm
            ))
        })?;

        Ok(Self {
            repository,
            config,
            algorithm,
        })
    }

    /// Authenticate by email and password, returning a bearer token.
    ///
    /// An unknown email is reported as such; a wrong password is not
    /// distinguished further.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<String> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not registered.".to_string()))?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::BadRequest("Incorrect email or password.".to_string()));
        }

        self.issue_token(&user)
    }

    /// Re-issue a token for an already-authenticated principal
    pub fn refresh_token(&self, user: &User) -> AppResult<String> {
        self.issue_token(user)
    }

    /// Resolve a bearer token to the stored principal.
    ///
    /// Signature, expiry and subject are checked by the claims parser; a
    /// subject that no longer exists in the store also fails authentication.
    pub async fn authorize(&self, token: &str) -> AppResult<User> {
        let claims = UserClaims::from_token(token, &self.config.jwt_secret, self.algorithm)
            .map_err(|_| AppError::Unauthenticated("Could not validate credentials".to_string()))?;

        self.repository
            .users
            .get_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("Could not validate credentials".to_string()))
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_days as i64 * 86400);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            is_admin: user.is_admin,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret, self.algorithm)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// List users
    pub async fn list_users(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        self.repository.users.list(query).await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Open registration: anyone may create a user
    pub async fn create_user(&self, user: UserInput) -> AppResult<User> {
        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict("User already registered.".to_string()));
        }

        let password_hash = hash_password(&user.password)?;
        self.repository.users.create(&user, &password_hash).await
    }

    /// Replace a user record. The actor must already have passed the
    /// self-or-admin check; the escalation guard is applied here.
    pub async fn update_user(&self, actor: &User, id: i32, user: UserInput) -> AppResult<User> {
        if self
            .repository
            .users
            .email_exists(&user.email, Some(id))
            .await?
        {
            return Err(AppError::Conflict("Username or Email already exists.".to_string()));
        }

        let password_hash = hash_password(&user.password)?;
        let is_admin = actor.effective_admin_flag(user.is_admin);

        self.repository
            .users
            .update(id, &user, &password_hash, is_admin)
            .await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}

/// Hash a password with argon2 and a fresh salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored argon2 hash
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

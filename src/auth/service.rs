//! Credential store boundary and login flow
//!
//! Owns user registration, credential verification, and profile lookup.
//! The stored password hash never leaves this module: callers only ever
//! see the hash-free [`User`] DTO.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::error::AuthError;
use crate::auth::password;
use crate::auth::tokens::{Claims, TokenService};
use crate::core_types::UserId;
use crate::store::{NewUser, StoreError, UserRecord, UserStore};

/// User Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    #[schema(example = "Alice")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "555-0100")]
    pub mobile: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
}

/// User Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

/// Public user view. Deliberately excludes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub mobile: String,
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        Self {
            user_id: record.user_id,
            name: record.name.clone(),
            email: record.email.clone(),
            mobile: record.mobile.clone(),
        }
    }
}

/// Login Response (JWT + identity)
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Register a new user
    ///
    /// # Errors
    /// `DuplicateIdentity` if the email is already registered.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AuthError> {
        let email = req.email.trim().to_lowercase();
        let password_hash = password::hash(&req.password)?;

        let record = self
            .store
            .insert(NewUser {
                name: req.name.trim().to_string(),
                email,
                mobile: req.mobile,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate { .. } => AuthError::DuplicateIdentity,
                other => AuthError::Store(other),
            })?;

        tracing::info!(user_id = record.user_id, "registered user");
        Ok(User::from(&record))
    }

    /// Verify credentials and issue a session token
    ///
    /// # Errors
    /// `NotFound` for an unknown email, `InvalidCredentials` on hash
    /// mismatch.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AuthError> {
        let email = req.email.trim().to_lowercase();
        let record = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !password::verify(&req.password, &record.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(record.user_id, &record.email)?;
        Ok(LoginResponse {
            token,
            user_id: record.user_id,
            name: record.name,
            email: record.email,
        })
    }

    /// Profile lookup by id
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        let record = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotFound)?;
        Ok(User::from(&record))
    }

    /// Verify a bearer token presented on an authenticated request.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }
}

//! Registration and login.

use std::sync::Arc;

use validator::Validate;

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

use super::input::{Credentials, RegisterUser};

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
    pub user_id: i32,
    pub username: String,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new user. The password is hashed before it reaches the store.
    pub async fn register(&self, input: RegisterUser) -> Result<User, DomainError> {
        input.validate()?;

        if self.users.find_by_username(&input.username).await?.is_some() {
            tracing::warn!(username = %input.username, "Registration rejected: username taken");
            return Err(DomainError::Duplicate("username already exists".to_string()));
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            tracing::warn!(username = %input.username, "Registration rejected: email taken");
            return Err(DomainError::Duplicate("email already exists".to_string()));
        }

        let password_hash = self.passwords.hash(&input.password)?;

        // The unique indexes still guard against a concurrent registration.
        let user = self
            .users
            .create(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, input: Credentials) -> Result<Session, DomainError> {
        input.validate()?;

        let Some(user) = self.users.find_by_username(&input.username).await? else {
            tracing::warn!(username = %input.username, "Login failed: unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.passwords.verify(&input.password, &user.password_hash) {
            tracing::warn!(username = %input.username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self
            .tokens
            .issue(user.id, &user.username)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in");
        Ok(Session {
            token,
            expires_in: self.tokens.expiration_seconds(),
            user_id: user.id,
            username: user.username,
        })
    }
}

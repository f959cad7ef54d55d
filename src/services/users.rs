//! User directory service

use std::sync::Arc;

use validator::Validate;

use crate::{
    config::UsersConfig,
    error::{AppError, AppResult},
    models::{CreateUser, NewUser, User},
    repository::UserStore,
    services::password::PasswordHasher,
};

#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    config: UsersConfig,
}

impl UsersService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: UsersConfig,
    ) -> Self {
        Self { store, hasher, config }
    }

    /// Apply the configured email comparison policy
    fn normalize_email(&self, email: &str) -> String {
        let email = email.trim();
        if self.config.email_case_insensitive {
            email.to_lowercase()
        } else {
            email.to_string()
        }
    }

    /// Register a new user, storing only the password hash
    pub async fn register(&self, candidate: CreateUser) -> AppResult<User> {
        let mut candidate = candidate.trimmed();
        candidate.validate()?;
        candidate.email = self.normalize_email(&candidate.email);

        if self.store.email_exists(&candidate.email).await? {
            tracing::warn!("Registration rejected: email {} already exists", candidate.email);
            return Err(AppError::DuplicateEmail(candidate.email));
        }

        let password_hash = self.hasher.hash(&candidate.password)?;

        let user = self
            .store
            .create(&NewUser {
                email: candidate.email,
                first_name: candidate.first_name,
                last_name: candidate.last_name,
                password_hash,
            })
            .await?;

        tracing::info!("Registered user id={}", user.id);
        Ok(user)
    }

    /// List all users in insertion order
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        self.store.list_all().await
    }

    /// Check an email/password pair against the directory.
    ///
    /// Service-level only; no route exposes a login.
    pub async fn check_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let email = self.normalize_email(email);
        let user = self
            .store
            .get_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}

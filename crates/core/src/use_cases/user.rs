//! User registration and authentication use-cases.

use std::sync::Arc;

use crate::entities::user::{AuthenticateUser, CreateUser, NewUser, User};
use crate::error::CoreError;
use crate::repository::{PasswordHasher, UserRepository};
use crate::types::DbId;
use crate::validation::validate;

/// Message returned for any failed login, so callers cannot tell which emails exist.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct UserUseCases {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserUseCases {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: DbId) -> Result<Option<User>, CoreError> {
        self.repo.find_by_id(id).await
    }

    /// Register a user. The password is hashed before it reaches the repository.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &CreateUser) -> Result<User, CoreError> {
        validate(input)?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(CoreError::EmailInUse(input.email.clone()));
        }

        let new_user = NewUser {
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: self.hasher.hash(&input.password)?,
        };
        let user = self.repo.create(&new_user).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Check an email/password pair, returning the matching user.
    #[tracing::instrument(skip_all)]
    pub async fn authenticate(&self, input: &AuthenticateUser) -> Result<User, CoreError> {
        validate(input)?;

        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "Failed login attempt");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        Ok(user)
    }
}

use crate::entities::User;
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

/// User Service - Contains business logic
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Create a new user; a blank name is replaced by the login before saving
    pub async fn create_user(&self, user: User) -> Result<User, DomainError> {
        user.validate(today())?;
        let user = User { id: None, ..user.normalized() };

        let saved = self.user_repository.save(&user).await?;
        info!(id = ?saved.id, login = %saved.login, "user created");
        Ok(saved)
    }

    /// Get user by ID
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        match self.user_repository.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    /// Replace every attribute of an existing user
    pub async fn update_user(&self, user: User) -> Result<User, DomainError> {
        // Ensure user has an ID
        let user_id = user.id.ok_or_else(|| {
            DomainError::ValidationError("User ID is required for updates".to_string())
        })?;

        user.validate(today())?;
        let user = user.normalized();

        self.get_user(user_id).await?;

        let updated = self.user_repository.update(&user).await?;
        info!(id = user_id, "user updated");
        Ok(updated)
    }

    /// Get all users
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repository.find_all().await
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

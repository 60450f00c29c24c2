use crate::entities::LikeCount;
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Atomic insert-if-absent. Returns whether a row was inserted.
    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError>;
    /// Returns whether a row was removed.
    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError>;
    async fn liked_by_user(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError>;
    /// One entry per film with at least one like.
    async fn like_counts(&self) -> Result<Vec<LikeCount>, DomainError>;
}

use crate::errors::DomainError;
use async_trait::async_trait;

/// Storage for undirected friendships.
///
/// Implementations keep one row per friendship regardless of argument order,
/// and `add_friendship` must be an atomic insert-if-absent.
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Returns `false` when the friendship already existed.
    async fn add_friendship(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError>;
    /// Returns `false` when there was nothing to remove.
    async fn remove_friendship(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError>;
    async fn friendship_exists(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError>;
    /// Ids of everyone `user_id` is friends with, ascending.
    async fn friends_of(&self, user_id: i64) -> Result<Vec<i64>, DomainError>;
}

use crate::entities::User;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    /// Users for the given ids, ordered by id. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, DomainError>;
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    /// Persists a new user and returns it with its assigned id.
    async fn save(&self, user: &User) -> Result<User, DomainError>;
    /// Replaces every attribute of an existing user.
    async fn update(&self, user: &User) -> Result<User, DomainError>;
}

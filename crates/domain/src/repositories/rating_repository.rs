use crate::entities::Rating;
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Rating>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Rating>, DomainError>;
}

use crate::entities::Genre;
use crate::errors::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;
    /// Genres associated with a film, ordered by genre id.
    async fn find_by_film(&self, film_id: i64) -> Result<Vec<Genre>, DomainError>;
    /// Batch variant of `find_by_film`; films without genres are absent from the map.
    async fn find_by_films(&self, film_ids: &[i64]) -> Result<HashMap<i64, Vec<Genre>>, DomainError>;
}

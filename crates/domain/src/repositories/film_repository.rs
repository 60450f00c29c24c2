use crate::entities::Film;
use crate::errors::DomainError;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Film rows together with their genre associations.
///
/// `save` and `update` write the film and its genre set in one atomic step:
/// either both land or neither does.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, DomainError>;
    /// Films for the given ids, ordered by id. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Film>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Film>, DomainError>;
    /// `genre_ids` of `None` stores the film without genres.
    async fn save(
        &self,
        film: &Film,
        genre_ids: Option<&BTreeSet<i32>>,
    ) -> Result<Film, DomainError>;
    /// `genre_ids` of `None` keeps the current genres; an empty set clears them.
    async fn update(
        &self,
        film: &Film,
        genre_ids: Option<&BTreeSet<i32>>,
    ) -> Result<Film, DomainError>;
}

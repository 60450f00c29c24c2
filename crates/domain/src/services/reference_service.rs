use crate::entities::{Genre, Rating};
use crate::errors::DomainError;
use crate::repositories::{GenreRepository, RatingRepository};
use std::sync::Arc;

/// Read access to the genre and MPA rating lookup tables.
pub struct ReferenceService {
    genre_repository: Arc<dyn GenreRepository>,
    rating_repository: Arc<dyn RatingRepository>,
}

impl ReferenceService {
    pub fn new(
        genre_repository: Arc<dyn GenreRepository>,
        rating_repository: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            genre_repository,
            rating_repository,
        }
    }

    pub async fn all_genres(&self) -> Result<Vec<Genre>, DomainError> {
        self.genre_repository.find_all().await
    }

    pub async fn genre(&self, id: i32) -> Result<Genre, DomainError> {
        self.genre_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::GenreNotFound(id))
    }

    pub async fn all_ratings(&self) -> Result<Vec<Rating>, DomainError> {
        self.rating_repository.find_all().await
    }

    pub async fn rating(&self, id: i32) -> Result<Rating, DomainError> {
        self.rating_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RatingNotFound(id))
    }
}

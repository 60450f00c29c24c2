use crate::entities::{Film, FilmDetails, Rating};
use crate::errors::DomainError;
use crate::repositories::{FilmRepository, GenreRepository, RatingRepository};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Film CRUD plus assembly of rating and genre data into `FilmDetails`.
pub struct FilmService {
    film_repository: Arc<dyn FilmRepository>,
    genre_repository: Arc<dyn GenreRepository>,
    rating_repository: Arc<dyn RatingRepository>,
}

impl FilmService {
    pub fn new(
        film_repository: Arc<dyn FilmRepository>,
        genre_repository: Arc<dyn GenreRepository>,
        rating_repository: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            film_repository,
            genre_repository,
            rating_repository,
        }
    }

    /// Validates and stores a new film.
    ///
    /// `genre_ids` of `None` leaves the film without genres; duplicates are collapsed.
    pub async fn create_film(
        &self,
        film: Film,
        genre_ids: Option<Vec<i32>>,
    ) -> Result<FilmDetails, DomainError> {
        film.validate()?;
        let genre_ids = self.validate_relations(&film, genre_ids).await?;

        let saved = self
            .film_repository
            .save(&Film { id: None, ..film }, genre_ids.as_ref())
            .await?;

        info!(id = ?saved.id, name = %saved.name, "film created");
        self.describe_one(saved).await
    }

    /// Full replace of an existing film.
    ///
    /// `genre_ids` of `None` keeps the current genres, `Some(vec![])` clears them.
    pub async fn update_film(
        &self,
        film: Film,
        genre_ids: Option<Vec<i32>>,
    ) -> Result<FilmDetails, DomainError> {
        let film_id = film.id.ok_or_else(|| {
            DomainError::ValidationError("Film ID is required for updates".to_string())
        })?;

        film.validate()?;
        let genre_ids = self.validate_relations(&film, genre_ids).await?;
        self.get_film_record(film_id).await?;

        let updated = self
            .film_repository
            .update(&film, genre_ids.as_ref())
            .await?;

        info!(id = film_id, "film updated");
        self.describe_one(updated).await
    }

    pub async fn get_film(&self, id: i64) -> Result<FilmDetails, DomainError> {
        let film = self.get_film_record(id).await?;
        self.describe_one(film).await
    }

    pub async fn get_all_films(&self) -> Result<Vec<FilmDetails>, DomainError> {
        let films = self.film_repository.find_all().await?;
        self.describe(films).await
    }

    /// Hydrates films with their rating and genres, keeping the input order.
    pub async fn describe(&self, films: Vec<Film>) -> Result<Vec<FilmDetails>, DomainError> {
        if films.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = films.iter().filter_map(|film| film.id).collect();
        let mut genres = self.genre_repository.find_by_films(&ids).await?;
        let ratings: HashMap<i32, Rating> = self
            .rating_repository
            .find_all()
            .await?
            .into_iter()
            .map(|rating| (rating.id, rating))
            .collect();

        debug!(films = films.len(), "describing films");
        films
            .into_iter()
            .map(|film| {
                let rating = match film.rating_id {
                    Some(rating_id) => Some(
                        ratings
                            .get(&rating_id)
                            .cloned()
                            .ok_or(DomainError::RatingNotFound(rating_id))?,
                    ),
                    None => None,
                };
                let genres = film
                    .id
                    .and_then(|id| genres.remove(&id))
                    .unwrap_or_default();
                Ok(FilmDetails {
                    film,
                    rating,
                    genres,
                })
            })
            .collect()
    }

    async fn describe_one(&self, film: Film) -> Result<FilmDetails, DomainError> {
        let mut described = self.describe(vec![film]).await?;
        described
            .pop()
            .ok_or_else(|| DomainError::Inconsistency("film vanished while describing".to_string()))
    }

    async fn get_film_record(&self, id: i64) -> Result<Film, DomainError> {
        self.film_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::FilmNotFound(id))
    }

    async fn validate_relations(
        &self,
        film: &Film,
        genre_ids: Option<Vec<i32>>,
    ) -> Result<Option<BTreeSet<i32>>, DomainError> {
        if let Some(rating_id) = film.rating_id {
            if self.rating_repository.find_by_id(rating_id).await?.is_none() {
                return Err(DomainError::RatingNotFound(rating_id));
            }
        }

        let Some(genre_ids) = genre_ids else {
            return Ok(None);
        };

        let genre_ids: BTreeSet<i32> = genre_ids.into_iter().collect();
        for genre_id in &genre_ids {
            if self.genre_repository.find_by_id(*genre_id).await?.is_none() {
                return Err(DomainError::GenreNotFound(*genre_id));
            }
        }
        Ok(Some(genre_ids))
    }
}

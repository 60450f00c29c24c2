use async_trait::async_trait;
use domain::{
    default_genres, default_ratings, DomainError, Genre, GenreRepository, Rating,
    RatingRepository,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Film id to genre ids. Written by the film store, read by the genre store.
#[derive(Clone, Default)]
pub struct FilmGenreLinks(Arc<RwLock<HashMap<i64, BTreeSet<i32>>>>);

impl FilmGenreLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn inner(&self) -> &RwLock<HashMap<i64, BTreeSet<i32>>> {
        &self.0
    }
}

/// Overwrites one film's genre set. An empty set clears it.
pub(crate) fn replace_links(
    links: &mut HashMap<i64, BTreeSet<i32>>,
    film_id: i64,
    genre_ids: &BTreeSet<i32>,
) {
    if genre_ids.is_empty() {
        links.remove(&film_id);
    } else {
        links.insert(film_id, genre_ids.clone());
    }
}

/// Static genre table plus a view of the film/genre links.
pub struct InMemoryGenreRepository {
    genres: BTreeMap<i32, Genre>,
    film_genres: FilmGenreLinks,
}

impl InMemoryGenreRepository {
    pub fn new() -> Self {
        Self::with_links(FilmGenreLinks::new())
    }

    pub fn with_links(film_genres: FilmGenreLinks) -> Self {
        Self {
            genres: default_genres()
                .into_iter()
                .map(|genre| (genre.id, genre))
                .collect(),
            film_genres,
        }
    }

    fn resolve(&self, ids: &BTreeSet<i32>) -> Vec<Genre> {
        ids.iter()
            .filter_map(|id| self.genres.get(id).cloned())
            .collect()
    }
}

impl Default for InMemoryGenreRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenreRepository for InMemoryGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        Ok(self.genres.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        Ok(self.genres.get(&id).cloned())
    }

    async fn find_by_film(&self, film_id: i64) -> Result<Vec<Genre>, DomainError> {
        let film_genres = self.film_genres.inner().read().await;
        Ok(film_genres
            .get(&film_id)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default())
    }

    async fn find_by_films(
        &self,
        film_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Genre>>, DomainError> {
        let film_genres = self.film_genres.inner().read().await;
        Ok(film_ids
            .iter()
            .filter_map(|film_id| {
                film_genres
                    .get(film_id)
                    .filter(|ids| !ids.is_empty())
                    .map(|ids| (*film_id, self.resolve(ids)))
            })
            .collect())
    }
}

pub struct InMemoryRatingRepository {
    ratings: BTreeMap<i32, Rating>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self {
            ratings: default_ratings()
                .into_iter()
                .map(|rating| (rating.id, rating))
                .collect(),
        }
    }
}

impl Default for InMemoryRatingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn find_all(&self) -> Result<Vec<Rating>, DomainError> {
        Ok(self.ratings.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Rating>, DomainError> {
        Ok(self.ratings.get(&id).cloned())
    }
}

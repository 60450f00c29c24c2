use super::reference_store::{replace_links, FilmGenreLinks};
use async_trait::async_trait;
use domain::{default_genres, DomainError, Film, FilmRepository, User, UserRepository};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

/// Rows keyed by id plus the next id to hand out.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn replace(&mut self, id: i64, row: T) -> Option<T> {
        let slot = self.rows.get_mut(&id)?;
        *slot = row.clone();
        Some(row)
    }

    fn get_many(&self, ids: &[i64]) -> Vec<T> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids.iter()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect()
    }
}

pub struct InMemoryUserRepository {
    users: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.get_many(ids))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.insert(|id| User {
            id: Some(id),
            ..user.clone()
        }))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let user_id = user.id.ok_or_else(|| {
            DomainError::ValidationError("User ID is required for updates".to_string())
        })?;
        self.users
            .write()
            .await
            .replace(user_id, user.clone())
            .ok_or(DomainError::UserNotFound(user_id))
    }
}

/// Films plus their genre links. Writes lock `films` before the links.
pub struct InMemoryFilmRepository {
    films: RwLock<Table<Film>>,
    film_genres: FilmGenreLinks,
}

impl InMemoryFilmRepository {
    pub fn new() -> Self {
        Self::with_links(FilmGenreLinks::new())
    }

    pub fn with_links(film_genres: FilmGenreLinks) -> Self {
        Self {
            films: RwLock::new(Table::new()),
            film_genres,
        }
    }
}

/// Rejects genre ids outside the seeded genre table before anything is written.
fn check_genres(genre_ids: Option<&BTreeSet<i32>>) -> Result<(), DomainError> {
    let Some(genre_ids) = genre_ids else {
        return Ok(());
    };
    let known: BTreeSet<i32> = default_genres().into_iter().map(|genre| genre.id).collect();
    match genre_ids.difference(&known).next() {
        Some(unknown) => Err(DomainError::GenreNotFound(*unknown)),
        None => Ok(()),
    }
}

impl Default for InMemoryFilmRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilmRepository for InMemoryFilmRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, DomainError> {
        Ok(self.films.read().await.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Film>, DomainError> {
        Ok(self.films.read().await.get_many(ids))
    }

    async fn find_all(&self) -> Result<Vec<Film>, DomainError> {
        Ok(self.films.read().await.rows.values().cloned().collect())
    }

    async fn save(
        &self,
        film: &Film,
        genre_ids: Option<&BTreeSet<i32>>,
    ) -> Result<Film, DomainError> {
        check_genres(genre_ids)?;
        let mut films = self.films.write().await;
        let mut links = self.film_genres.inner().write().await;

        let saved = films.insert(|id| film.clone().with_id(id));
        if let (Some(film_id), Some(genre_ids)) = (saved.id, genre_ids) {
            replace_links(&mut links, film_id, genre_ids);
        }
        Ok(saved)
    }

    async fn update(
        &self,
        film: &Film,
        genre_ids: Option<&BTreeSet<i32>>,
    ) -> Result<Film, DomainError> {
        let film_id = film.id.ok_or_else(|| {
            DomainError::ValidationError("Film ID is required for updates".to_string())
        })?;
        check_genres(genre_ids)?;
        let mut films = self.films.write().await;
        let mut links = self.film_genres.inner().write().await;

        let updated = films
            .replace(film_id, film.clone())
            .ok_or(DomainError::FilmNotFound(film_id))?;
        if let Some(genre_ids) = genre_ids {
            replace_links(&mut links, film_id, genre_ids);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryGenreRepository;
    use chrono::NaiveDate;
    use domain::GenreRepository;

    fn user(login: &str) -> User {
        User::new(
            format!("{}@example.com", login),
            login.to_string(),
            login.to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let repo = InMemoryUserRepository::new();
        let first = repo.save(&user("a")).await.unwrap();
        let second = repo.save(&user("b")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let ghost = User {
            id: Some(99),
            ..user("ghost")
        };

        assert_eq!(
            repo.update(&ghost).await.unwrap_err(),
            DomainError::UserNotFound(99)
        );
    }

    #[tokio::test]
    async fn find_by_ids_skips_unknown_and_sorts() {
        let repo = InMemoryFilmRepository::new();
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        for name in ["one", "two", "three"] {
            repo.save(&Film::new(name.to_string(), None, date, 90, None), None)
                .await
                .unwrap();
        }

        let found: Vec<i64> = repo
            .find_by_ids(&[3, 42, 1, 3])
            .await
            .unwrap()
            .into_iter()
            .filter_map(|film| film.id)
            .collect();
        assert_eq!(found, vec![1, 3]);
    }

    #[tokio::test]
    async fn film_and_genres_are_written_together() {
        let links = FilmGenreLinks::new();
        let films = InMemoryFilmRepository::with_links(links.clone());
        let genres = InMemoryGenreRepository::with_links(links);
        let date = NaiveDate::from_ymd_opt(1979, 5, 25).unwrap();
        let alien = Film::new("Alien".to_string(), None, date, 117, None);

        let rejected = films
            .save(&alien, Some(&BTreeSet::from([4, 99])))
            .await
            .unwrap_err();
        assert_eq!(rejected, DomainError::GenreNotFound(99));
        assert!(films.find_all().await.unwrap().is_empty());

        let saved = films
            .save(&alien, Some(&BTreeSet::from([4])))
            .await
            .unwrap();
        let film_id = saved.id.unwrap();
        assert_eq!(genres.find_by_film(film_id).await.unwrap()[0].id, 4);

        films.update(&saved, None).await.unwrap();
        assert_eq!(genres.find_by_film(film_id).await.unwrap().len(), 1);

        films
            .update(&saved, Some(&BTreeSet::new()))
            .await
            .unwrap();
        assert!(genres.find_by_film(film_id).await.unwrap().is_empty());
    }
}

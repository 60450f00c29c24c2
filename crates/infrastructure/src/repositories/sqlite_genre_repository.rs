use crate::database::{film_genres, genres, run_blocking, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, Genre, GenreRepository};
use std::collections::HashMap;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct GenreModel {
    id: i32,
    name: String,
}

impl From<GenreModel> for Genre {
    fn from(model: GenreModel) -> Self {
        Genre::new(model.id, model.name)
    }
}

pub struct SqliteGenreRepository {
    pool: SqlitePool,
}

impl SqliteGenreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for SqliteGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        let result = run_blocking(&self.pool, |conn| {
            genres::table
                .order(genres::id.asc())
                .select(GenreModel::as_select())
                .load::<GenreModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Genre::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            genres::table
                .filter(genres::id.eq(id))
                .select(GenreModel::as_select())
                .first::<GenreModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Genre::from))
    }

    async fn find_by_film(&self, film_id: i64) -> Result<Vec<Genre>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            film_genres::table
                .inner_join(genres::table)
                .filter(film_genres::film_id.eq(film_id))
                .order(genres::id.asc())
                .select(GenreModel::as_select())
                .load::<GenreModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Genre::from).collect())
    }

    async fn find_by_films(
        &self,
        film_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Genre>>, DomainError> {
        let film_ids = film_ids.to_vec();
        let rows = run_blocking(&self.pool, move |conn| {
            film_genres::table
                .inner_join(genres::table)
                .filter(film_genres::film_id.eq_any(film_ids))
                .order((film_genres::film_id.asc(), genres::id.asc()))
                .select((film_genres::film_id, genres::id, genres::name))
                .load::<(i64, i32, String)>(conn)
        })
        .await?;

        let mut by_film: HashMap<i64, Vec<Genre>> = HashMap::new();
        for (film_id, genre_id, name) in rows {
            by_film
                .entry(film_id)
                .or_default()
                .push(Genre::new(genre_id, name));
        }
        Ok(by_film)
    }
}

use crate::database::{film_genres, films, last_insert_rowid, run_blocking, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use domain::{DomainError, Film, FilmRepository};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = films)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct FilmModel {
    id: i64,
    name: String,
    description: Option<String>,
    release_date: NaiveDate,
    duration: i32,
    rating_id: Option<i32>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = films)]
#[diesel(treat_none_as_null = true)]
struct FilmRow {
    name: String,
    description: Option<String>,
    release_date: NaiveDate,
    duration: i32,
    rating_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = film_genres)]
struct FilmGenreRow {
    film_id: i64,
    genre_id: i32,
}

/// Overwrites the film's genre set on the caller's transaction.
fn replace_genres(
    conn: &mut SqliteConnection,
    film_id: i64,
    genre_ids: &[i32],
) -> QueryResult<()> {
    diesel::delete(film_genres::table.filter(film_genres::film_id.eq(film_id))).execute(conn)?;
    let rows: Vec<FilmGenreRow> = genre_ids
        .iter()
        .map(|&genre_id| FilmGenreRow { film_id, genre_id })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(film_genres::table)
            .values(&rows)
            .execute(conn)?;
    }
    Ok(())
}

impl From<FilmModel> for Film {
    fn from(model: FilmModel) -> Self {
        Film::new(
            model.name,
            model.description,
            model.release_date,
            model.duration,
            model.rating_id,
        )
        .with_id(model.id)
    }
}

impl From<&Film> for FilmRow {
    fn from(film: &Film) -> Self {
        FilmRow {
            name: film.name.clone(),
            description: film.description.clone(),
            release_date: film.release_date,
            duration: film.duration,
            rating_id: film.rating_id,
        }
    }
}

pub struct SqliteFilmRepository {
    pool: SqlitePool,
}

impl SqliteFilmRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilmRepository for SqliteFilmRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Film>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            films::table
                .filter(films::id.eq(id))
                .select(FilmModel::as_select())
                .first::<FilmModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Film::from))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Film>, DomainError> {
        let ids = ids.to_vec();
        let result = run_blocking(&self.pool, move |conn| {
            films::table
                .filter(films::id.eq_any(ids))
                .order(films::id.asc())
                .select(FilmModel::as_select())
                .load::<FilmModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Film::from).collect())
    }

    async fn find_all(&self) -> Result<Vec<Film>, DomainError> {
        let result = run_blocking(&self.pool, |conn| {
            films::table
                .order(films::id.asc())
                .select(FilmModel::as_select())
                .load::<FilmModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Film::from).collect())
    }

    async fn save(
        &self,
        film: &Film,
        genre_ids: Option<&BTreeSet<i32>>,
    ) -> Result<Film, DomainError> {
        let row = FilmRow::from(film);
        let genre_ids: Option<Vec<i32>> = genre_ids.map(|ids| ids.iter().copied().collect());

        let result = run_blocking(&self.pool, move |conn| {
            conn.immediate_transaction(|conn| {
                diesel::insert_into(films::table)
                    .values(&row)
                    .execute(conn)?;
                let id = last_insert_rowid(conn)?;
                if let Some(genre_ids) = &genre_ids {
                    replace_genres(conn, id, genre_ids)?;
                }

                films::table
                    .filter(films::id.eq(id))
                    .select(FilmModel::as_select())
                    .first::<FilmModel>(conn)
            })
        })
        .await?;

        Ok(result.into())
    }

    async fn update(
        &self,
        film: &Film,
        genre_ids: Option<&BTreeSet<i32>>,
    ) -> Result<Film, DomainError> {
        let film_id = film.id.ok_or_else(|| {
            DomainError::ValidationError("Film ID is required for updates".to_string())
        })?;
        let row = FilmRow::from(film);
        let genre_ids: Option<Vec<i32>> = genre_ids.map(|ids| ids.iter().copied().collect());

        let result = run_blocking(&self.pool, move |conn| {
            conn.immediate_transaction(|conn| {
                let updated = diesel::update(films::table.filter(films::id.eq(film_id)))
                    .set(&row)
                    .execute(conn)?;
                if updated == 0 {
                    return Ok(None);
                }
                if let Some(genre_ids) = &genre_ids {
                    replace_genres(conn, film_id, genre_ids)?;
                    debug!(film_id, genres = genre_ids.len(), "film genres replaced");
                }

                films::table
                    .filter(films::id.eq(film_id))
                    .select(FilmModel::as_select())
                    .first::<FilmModel>(conn)
                    .optional()
            })
        })
        .await?;

        result
            .map(Film::from)
            .ok_or(DomainError::FilmNotFound(film_id))
    }
}

use crate::database::{likes, run_blocking, SqlitePool};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use domain::{DomainError, Like, LikeCount, LikeRepository};
use tracing::debug;

#[derive(Insertable)]
#[diesel(table_name = likes)]
struct LikeRow {
    film_id: i64,
    user_id: i64,
}

impl From<Like> for LikeRow {
    fn from(like: Like) -> Self {
        LikeRow {
            film_id: like.film_id,
            user_id: like.user_id,
        }
    }
}

pub struct SqliteLikeRepository {
    pool: SqlitePool,
}

impl SqliteLikeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for SqliteLikeRepository {
    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let row = LikeRow::from(Like::new(film_id, user_id));

        let inserted = run_blocking(&self.pool, move |conn| {
            diesel::insert_or_ignore_into(likes::table)
                .values(&row)
                .execute(conn)
        })
        .await?;

        debug!(film_id, user_id, inserted, "add like");
        Ok(inserted > 0)
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let removed = run_blocking(&self.pool, move |conn| {
            diesel::delete(
                likes::table
                    .filter(likes::film_id.eq(film_id))
                    .filter(likes::user_id.eq(user_id)),
            )
            .execute(conn)
        })
        .await?;

        debug!(film_id, user_id, removed, "remove like");
        Ok(removed > 0)
    }

    async fn liked_by_user(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError> {
        run_blocking(&self.pool, move |conn| {
            diesel::select(diesel::dsl::exists(
                likes::table
                    .filter(likes::film_id.eq(film_id))
                    .filter(likes::user_id.eq(user_id)),
            ))
            .get_result::<bool>(conn)
        })
        .await
    }

    async fn like_counts(&self) -> Result<Vec<LikeCount>, DomainError> {
        let rows = run_blocking(&self.pool, |conn| {
            likes::table
                .group_by(likes::film_id)
                .select((likes::film_id, count_star()))
                .load::<(i64, i64)>(conn)
        })
        .await?;

        Ok(rows
            .into_iter()
            .map(|(film_id, likes)| LikeCount::new(film_id, likes.max(0) as u64))
            .collect())
    }
}

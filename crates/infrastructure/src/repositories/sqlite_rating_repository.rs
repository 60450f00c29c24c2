use crate::database::{ratings, run_blocking, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, Rating, RatingRepository};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct RatingModel {
    id: i32,
    name: String,
}

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Rating::new(model.id, model.name)
    }
}

pub struct SqliteRatingRepository {
    pool: SqlitePool,
}

impl SqliteRatingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for SqliteRatingRepository {
    async fn find_all(&self) -> Result<Vec<Rating>, DomainError> {
        let result = run_blocking(&self.pool, |conn| {
            ratings::table
                .order(ratings::id.asc())
                .select(RatingModel::as_select())
                .load::<RatingModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(Rating::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Rating>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            ratings::table
                .filter(ratings::id.eq(id))
                .select(RatingModel::as_select())
                .first::<RatingModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(Rating::from))
    }
}

use crate::database::{last_insert_rowid, run_blocking, users, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use domain::{DomainError, User, UserRepository};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: i64,
    email: String,
    login: String,
    name: String,
    birthday: Option<NaiveDate>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
struct UserRow {
    email: String,
    login: String,
    name: String,
    birthday: Option<NaiveDate>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::with_id(model.id, model.email, model.login, model.name, model.birthday)
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        UserRow {
            email: user.email.clone(),
            login: user.login.clone(),
            name: user.name.clone(),
            birthday: user.birthday,
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let result = run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, DomainError> {
        let ids = ids.to_vec();
        let result = run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::id.eq_any(ids))
                .order(users::id.asc())
                .select(UserModel::as_select())
                .load::<UserModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(User::from).collect())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let result = run_blocking(&self.pool, |conn| {
            users::table
                .order(users::id.asc())
                .select(UserModel::as_select())
                .load::<UserModel>(conn)
        })
        .await?;

        Ok(result.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let row = UserRow::from(user);

        let result = run_blocking(&self.pool, move |conn| {
            conn.immediate_transaction(|conn| {
                diesel::insert_into(users::table)
                    .values(&row)
                    .execute(conn)?;
                let id = last_insert_rowid(conn)?;

                users::table
                    .filter(users::id.eq(id))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
            })
        })
        .await?;

        Ok(result.into())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let user_id = user.id.ok_or_else(|| {
            DomainError::ValidationError("User ID is required for updates".to_string())
        })?;
        let row = UserRow::from(user);

        let result = run_blocking(&self.pool, move |conn| {
            conn.immediate_transaction(|conn| {
                diesel::update(users::table.filter(users::id.eq(user_id)))
                    .set(&row)
                    .execute(conn)?;

                users::table
                    .filter(users::id.eq(user_id))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()
            })
        })
        .await?;

        result
            .map(User::from)
            .ok_or(DomainError::UserNotFound(user_id))
    }
}

use crate::database::{friendships, run_blocking, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, FriendPair, FriendshipRepository};
use tracing::debug;

/// One row per friendship, keyed by `(user_low, user_high)`.
#[derive(Insertable)]
#[diesel(table_name = friendships)]
struct FriendshipRow {
    user_low: i64,
    user_high: i64,
}

impl From<FriendPair> for FriendshipRow {
    fn from(pair: FriendPair) -> Self {
        FriendshipRow {
            user_low: pair.low(),
            user_high: pair.high(),
        }
    }
}

pub struct SqliteFriendshipRepository {
    pool: SqlitePool,
}

impl SqliteFriendshipRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendshipRepository for SqliteFriendshipRepository {
    async fn add_friendship(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError> {
        let row = FriendshipRow::from(FriendPair::new(user_id, friend_id));

        let inserted = run_blocking(&self.pool, move |conn| {
            diesel::insert_or_ignore_into(friendships::table)
                .values(&row)
                .execute(conn)
        })
        .await?;

        debug!(user_id, friend_id, inserted, "add friendship");
        Ok(inserted > 0)
    }

    async fn remove_friendship(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError> {
        let pair = FriendPair::new(user_id, friend_id);

        let removed = run_blocking(&self.pool, move |conn| {
            diesel::delete(
                friendships::table
                    .filter(friendships::user_low.eq(pair.low()))
                    .filter(friendships::user_high.eq(pair.high())),
            )
            .execute(conn)
        })
        .await?;

        debug!(user_id, friend_id, removed, "remove friendship");
        Ok(removed > 0)
    }

    async fn friendship_exists(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError> {
        let pair = FriendPair::new(user_id, friend_id);

        run_blocking(&self.pool, move |conn| {
            diesel::select(diesel::dsl::exists(
                friendships::table
                    .filter(friendships::user_low.eq(pair.low()))
                    .filter(friendships::user_high.eq(pair.high())),
            ))
            .get_result::<bool>(conn)
        })
        .await
    }

    async fn friends_of(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        let mut friends = run_blocking(&self.pool, move |conn| {
            let mut ids = friendships::table
                .filter(friendships::user_low.eq(user_id))
                .select(friendships::user_high)
                .load::<i64>(conn)?;
            ids.extend(
                friendships::table
                    .filter(friendships::user_high.eq(user_id))
                    .select(friendships::user_low)
                    .load::<i64>(conn)?,
            );
            Ok(ids)
        })
        .await?;

        friends.sort_unstable();
        Ok(friends)
    }
}

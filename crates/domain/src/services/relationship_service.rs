use crate::entities::{Film, FriendPair, User};
use crate::errors::DomainError;
use crate::repositories::{FilmRepository, FriendshipRepository, LikeRepository, UserRepository};
use crate::services::popularity_ranking::PopularityRanking;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Enforces the friendship and like invariants on top of the relation stores.
///
/// Every precondition (self relation, missing endpoint, duplicate or missing
/// relation) is checked before the store is mutated. Duplicate detection for
/// adds relies on the store's atomic insert-if-absent, so two identical
/// concurrent requests yield one success and one `DuplicateRelation`.
pub struct RelationshipService {
    user_repository: Arc<dyn UserRepository>,
    film_repository: Arc<dyn FilmRepository>,
    friendship_repository: Arc<dyn FriendshipRepository>,
    like_repository: Arc<dyn LikeRepository>,
    ranking: PopularityRanking,
}

impl RelationshipService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        film_repository: Arc<dyn FilmRepository>,
        friendship_repository: Arc<dyn FriendshipRepository>,
        like_repository: Arc<dyn LikeRepository>,
    ) -> Self {
        let ranking = PopularityRanking::new(like_repository.clone());
        Self {
            user_repository,
            film_repository,
            friendship_repository,
            like_repository,
            ranking,
        }
    }

    pub async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<(), DomainError> {
        ensure_distinct(user_id, friend_id)?;
        self.require_user(user_id).await?;
        self.require_user(friend_id).await?;

        if !self
            .friendship_repository
            .add_friendship(user_id, friend_id)
            .await?
        {
            return Err(DomainError::DuplicateRelation(format!(
                "users {} and {} are already friends",
                user_id, friend_id
            )));
        }

        info!(user_id, friend_id, "friendship added");
        Ok(())
    }

    /// Removing a friendship that does not exist succeeds without changes.
    pub async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<(), DomainError> {
        ensure_distinct(user_id, friend_id)?;
        self.require_user(user_id).await?;
        self.require_user(friend_id).await?;

        if self
            .friendship_repository
            .remove_friendship(user_id, friend_id)
            .await?
        {
            info!(user_id, friend_id, "friendship removed");
        } else {
            debug!(user_id, friend_id, "no friendship to remove");
        }
        Ok(())
    }

    pub async fn friends_of(&self, user_id: i64) -> Result<Vec<User>, DomainError> {
        self.require_user(user_id).await?;
        let friend_ids = self.friendship_repository.friends_of(user_id).await?;
        self.hydrate_users(&friend_ids).await
    }

    pub async fn common_friends(
        &self,
        user_id: i64,
        other_user_id: i64,
    ) -> Result<Vec<User>, DomainError> {
        ensure_distinct(user_id, other_user_id)?;
        self.require_user(user_id).await?;
        self.require_user(other_user_id).await?;

        let mine: BTreeSet<i64> = self
            .friendship_repository
            .friends_of(user_id)
            .await?
            .into_iter()
            .collect();
        let theirs: BTreeSet<i64> = self
            .friendship_repository
            .friends_of(other_user_id)
            .await?
            .into_iter()
            .collect();

        let common: Vec<i64> = mine.intersection(&theirs).copied().collect();
        debug!(user_id, other_user_id, found = common.len(), "common friends");
        self.hydrate_users(&common).await
    }

    pub async fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), DomainError> {
        self.require_film(film_id).await?;
        self.require_user(user_id).await?;

        if !self.like_repository.add_like(film_id, user_id).await? {
            return Err(DomainError::DuplicateRelation(format!(
                "user {} already likes film {}",
                user_id, film_id
            )));
        }

        info!(film_id, user_id, "like added");
        Ok(())
    }

    /// Unlike `remove_friend`, removing a like that does not exist is an error.
    pub async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), DomainError> {
        self.require_film(film_id).await?;
        self.require_user(user_id).await?;

        if !self.like_repository.remove_like(film_id, user_id).await? {
            return Err(DomainError::MissingRelation(format!(
                "user {} does not like film {}",
                user_id, film_id
            )));
        }

        info!(film_id, user_id, "like removed");
        Ok(())
    }

    /// The `count` most liked films, most liked first.
    pub async fn top_popular(&self, count: i64) -> Result<Vec<Film>, DomainError> {
        let ranked = self.ranking.top_film_ids(count).await?;
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let mut films: HashMap<i64, Film> = self
            .film_repository
            .find_by_ids(&ranked)
            .await?
            .into_iter()
            .filter_map(|film| film.id.map(|id| (id, film)))
            .collect();

        ranked
            .iter()
            .map(|id| {
                films.remove(id).ok_or_else(|| {
                    DomainError::Inconsistency(format!("ranked film {} is missing", id))
                })
            })
            .collect()
    }

    async fn require_user(&self, id: i64) -> Result<User, DomainError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    async fn require_film(&self, id: i64) -> Result<Film, DomainError> {
        self.film_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::FilmNotFound(id))
    }

    async fn hydrate_users(&self, ids: &[i64]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.user_repository.find_by_ids(ids).await?;
        if users.len() != ids.len() {
            return Err(DomainError::Inconsistency(format!(
                "friend list references {} users but only {} exist",
                ids.len(),
                users.len()
            )));
        }
        Ok(users)
    }
}

fn ensure_distinct(user_id: i64, other_id: i64) -> Result<(), DomainError> {
    if FriendPair::new(user_id, other_id).is_self_relation() {
        return Err(DomainError::InvalidRelation(format!(
            "user {} cannot be related to themselves",
            user_id
        )));
    }
    Ok(())
}

use async_trait::async_trait;
use domain::{DomainError, FriendPair, FriendshipRepository, Like, LikeCount, LikeRepository};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryFriendshipRepository {
    pairs: RwLock<HashSet<FriendPair>>,
}

impl InMemoryFriendshipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryFriendshipRepository {
    async fn add_friendship(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError> {
        Ok(self
            .pairs
            .write()
            .await
            .insert(FriendPair::new(user_id, friend_id)))
    }

    async fn remove_friendship(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError> {
        Ok(self
            .pairs
            .write()
            .await
            .remove(&FriendPair::new(user_id, friend_id)))
    }

    async fn friendship_exists(&self, user_id: i64, friend_id: i64) -> Result<bool, DomainError> {
        Ok(self
            .pairs
            .read()
            .await
            .contains(&FriendPair::new(user_id, friend_id)))
    }

    async fn friends_of(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        let mut friends: Vec<i64> = self
            .pairs
            .read()
            .await
            .iter()
            .filter_map(|pair| pair.other(user_id))
            .collect();
        friends.sort_unstable();
        Ok(friends)
    }
}

#[derive(Default)]
pub struct InMemoryLikeRepository {
    likes: RwLock<HashSet<Like>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError> {
        Ok(self.likes.write().await.insert(Like::new(film_id, user_id)))
    }

    async fn remove_like(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError> {
        Ok(self.likes.write().await.remove(&Like::new(film_id, user_id)))
    }

    async fn liked_by_user(&self, film_id: i64, user_id: i64) -> Result<bool, DomainError> {
        Ok(self
            .likes
            .read()
            .await
            .contains(&Like::new(film_id, user_id)))
    }

    async fn like_counts(&self) -> Result<Vec<LikeCount>, DomainError> {
        let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
        for like in self.likes.read().await.iter() {
            *counts.entry(like.film_id).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(film_id, likes)| LikeCount::new(film_id, likes))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn friendship_is_visible_from_both_sides() {
        let repo = InMemoryFriendshipRepository::new();
        assert!(repo.add_friendship(1, 2).await.unwrap());

        assert!(repo.friendship_exists(1, 2).await.unwrap());
        assert!(repo.friendship_exists(2, 1).await.unwrap());
        assert_eq!(repo.friends_of(2).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn mirrored_insert_is_reported_as_existing() {
        let repo = InMemoryFriendshipRepository::new();
        assert!(repo.add_friendship(1, 2).await.unwrap());
        assert!(!repo.add_friendship(2, 1).await.unwrap());
    }

    #[tokio::test]
    async fn removing_absent_rows_reports_false() {
        let friends = InMemoryFriendshipRepository::new();
        assert!(!friends.remove_friendship(1, 2).await.unwrap());

        let likes = InMemoryLikeRepository::new();
        assert!(!likes.remove_like(1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn like_counts_group_by_film() {
        let repo = InMemoryLikeRepository::new();
        repo.add_like(1, 10).await.unwrap();
        repo.add_like(1, 11).await.unwrap();
        repo.add_like(2, 10).await.unwrap();
        assert!(!repo.add_like(2, 10).await.unwrap());

        assert_eq!(
            repo.like_counts().await.unwrap(),
            vec![LikeCount::new(1, 2), LikeCount::new(2, 1)]
        );
    }
}

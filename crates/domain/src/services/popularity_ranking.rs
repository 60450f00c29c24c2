use crate::entities::LikeCount;
use crate::errors::DomainError;
use crate::repositories::LikeRepository;
use std::cmp::Reverse;
use std::sync::Arc;

/// Computes the most-liked films from the current like set.
///
/// Only films with at least one like are ranked, so the result may be shorter
/// than the requested count.
pub struct PopularityRanking {
    like_repository: Arc<dyn LikeRepository>,
}

impl PopularityRanking {
    pub fn new(like_repository: Arc<dyn LikeRepository>) -> Self {
        Self { like_repository }
    }

    /// Ids of at most `count` films, most liked first.
    pub async fn top_film_ids(&self, count: i64) -> Result<Vec<i64>, DomainError> {
        let limit = validate_count(count)?;
        let counts = self.like_repository.like_counts().await?;
        Ok(rank_by_likes(counts, limit))
    }
}

pub fn validate_count(count: i64) -> Result<usize, DomainError> {
    if count <= 0 {
        return Err(DomainError::InvalidArgument(format!(
            "count must be a positive number, got {}",
            count
        )));
    }
    Ok(usize::try_from(count).unwrap_or(usize::MAX))
}

/// Orders by like count descending, then film id descending, and keeps `limit` entries.
pub fn rank_by_likes(mut counts: Vec<LikeCount>, limit: usize) -> Vec<i64> {
    counts.retain(|entry| entry.likes > 0);
    counts.sort_unstable_by_key(|entry| Reverse((entry.likes, entry.film_id)));
    counts
        .into_iter()
        .take(limit)
        .map(|entry| entry.film_id)
        .collect()
}

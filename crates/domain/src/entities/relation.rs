use serde::{Deserialize, Serialize};

/// An undirected friendship stored under its canonical `(low, high)` key.
///
/// Both `FriendPair::new(a, b)` and `FriendPair::new(b, a)` produce the same
/// value, so a store keyed by `FriendPair` holds at most one row per
/// friendship and answers existence checks in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FriendPair {
    low: i64,
    high: i64,
}

impl FriendPair {
    pub fn new(user_id: i64, friend_id: i64) -> Self {
        Self {
            low: user_id.min(friend_id),
            high: user_id.max(friend_id),
        }
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn is_self_relation(&self) -> bool {
        self.low == self.high
    }

    /// The other endpoint, if `user_id` is part of this pair.
    pub fn other(&self, user_id: i64) -> Option<i64> {
        if user_id == self.low {
            Some(self.high)
        } else if user_id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

/// "User `user_id` likes film `film_id`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Like {
    pub film_id: i64,
    pub user_id: i64,
}

impl Like {
    pub fn new(film_id: i64, user_id: i64) -> Self {
        Self { film_id, user_id }
    }
}

/// Number of distinct users liking a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
    pub film_id: i64,
    pub likes: u64,
}

impl LikeCount {
    pub fn new(film_id: i64, likes: u64) -> Self {
        Self { film_id, likes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_order_independent() {
        assert_eq!(FriendPair::new(7, 3), FriendPair::new(3, 7));
        let pair = FriendPair::new(7, 3);
        assert_eq!((pair.low(), pair.high()), (3, 7));
    }

    #[test]
    fn other_endpoint_lookup() {
        let pair = FriendPair::new(1, 2);
        assert_eq!(pair.other(1), Some(2));
        assert_eq!(pair.other(2), Some(1));
        assert_eq!(pair.other(3), None);
    }

    #[test]
    fn self_pair_is_detected() {
        assert!(FriendPair::new(4, 4).is_self_relation());
        assert!(!FriendPair::new(4, 5).is_self_relation());
    }
}

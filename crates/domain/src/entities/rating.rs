use serde::{Deserialize, Serialize};

/// MPA age rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rating {
    pub id: i32,
    pub name: String,
}

impl Rating {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ratings every store is seeded with.
pub fn default_ratings() -> Vec<Rating> {
    vec![
        Rating::new(1, "G"),
        Rating::new(2, "PG"),
        Rating::new(3, "PG-13"),
        Rating::new(4, "R"),
        Rating::new(5, "NC-17"),
    ]
}

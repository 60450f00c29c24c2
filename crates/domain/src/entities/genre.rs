use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Genres every store is seeded with.
pub fn default_genres() -> Vec<Genre> {
    vec![
        Genre::new(1, "Comedy"),
        Genre::new(2, "Drama"),
        Genre::new(3, "Animation"),
        Genre::new(4, "Thriller"),
        Genre::new(5, "Documentary"),
        Genre::new(6, "Action"),
    ]
}

//! Map-backed implementations of every repository port.
//!
//! Each store guards its state with a single `tokio::sync::RwLock`, so a
//! mutation (including check-then-insert) happens inside one write critical
//! section.

pub mod entity_store;
pub mod reference_store;
pub mod relation_store;

pub use entity_store::{InMemoryFilmRepository, InMemoryUserRepository};
pub use reference_store::{FilmGenreLinks, InMemoryGenreRepository, InMemoryRatingRepository};
pub use relation_store::{InMemoryFriendshipRepository, InMemoryLikeRepository};

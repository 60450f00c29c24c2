pub mod sqlite_film_repository;
pub mod sqlite_friendship_repository;
pub mod sqlite_genre_repository;
pub mod sqlite_like_repository;
pub mod sqlite_rating_repository;
pub mod sqlite_user_repository;

pub use sqlite_film_repository::SqliteFilmRepository;
pub use sqlite_friendship_repository::SqliteFriendshipRepository;
pub use sqlite_genre_repository::SqliteGenreRepository;
pub use sqlite_like_repository::SqliteLikeRepository;
pub use sqlite_rating_repository::SqliteRatingRepository;
pub use sqlite_user_repository::SqliteUserRepository;

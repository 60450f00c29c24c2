pub mod film_repository;
pub mod friendship_repository;
pub mod genre_repository;
pub mod like_repository;
pub mod rating_repository;
pub mod user_repository;

pub use film_repository::FilmRepository;
pub use friendship_repository::FriendshipRepository;
pub use genre_repository::GenreRepository;
pub use like_repository::LikeRepository;
pub use rating_repository::RatingRepository;
pub use user_repository::UserRepository;

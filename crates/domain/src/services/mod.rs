pub mod film_service;
pub mod popularity_ranking;
pub mod reference_service;
pub mod relationship_service;
pub mod user_service;

pub use film_service::FilmService;
pub use popularity_ranking::PopularityRanking;
pub use reference_service::ReferenceService;
pub use relationship_service::RelationshipService;
pub use user_service::UserService;

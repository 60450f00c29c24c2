use domain::{
    DomainError, FilmDetails, FilmRepository, FilmService, FriendshipRepository, GenreRepository,
    LikeRepository, RatingRepository, ReferenceService, RelationshipService, UserRepository,
    UserService,
};
use infrastructure::{
    Database, FilmGenreLinks, InMemoryFilmRepository, InMemoryFriendshipRepository,
    InMemoryGenreRepository, InMemoryLikeRepository, InMemoryRatingRepository,
    InMemoryUserRepository, SqliteFilmRepository, SqliteFriendshipRepository,
    SqliteGenreRepository, SqliteLikeRepository, SqliteRatingRepository, SqliteUserRepository,
};
use std::sync::Arc;
use tracing::info;

/// Every repository port, bound to one concrete backend.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub films: Arc<dyn FilmRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub friendships: Arc<dyn FriendshipRepository>,
    pub likes: Arc<dyn LikeRepository>,
}

impl Repositories {
    /// Diesel-backed repositories sharing one SQLite pool.
    pub fn sqlite(database: &Database) -> Self {
        let pool = database.get_pool().clone();
        Self {
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            films: Arc::new(SqliteFilmRepository::new(pool.clone())),
            genres: Arc::new(SqliteGenreRepository::new(pool.clone())),
            ratings: Arc::new(SqliteRatingRepository::new(pool.clone())),
            friendships: Arc::new(SqliteFriendshipRepository::new(pool.clone())),
            likes: Arc::new(SqliteLikeRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let film_genres = FilmGenreLinks::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            films: Arc::new(InMemoryFilmRepository::with_links(film_genres.clone())),
            genres: Arc::new(InMemoryGenreRepository::with_links(film_genres)),
            ratings: Arc::new(InMemoryRatingRepository::new()),
            friendships: Arc::new(InMemoryFriendshipRepository::new()),
            likes: Arc::new(InMemoryLikeRepository::new()),
        }
    }
}

/// Film rating application - wires the services over a chosen store
pub struct FilmrateApp {
    pub user_service: UserService,
    pub film_service: FilmService,
    pub reference_service: ReferenceService,
    pub relationship_service: RelationshipService,
    repositories: Repositories,
}

impl FilmrateApp {
    /// Application backed by the SQLite file at `database_path`.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let database = Database::new(database_path)?;
        info!(path = database_path, "using SQLite storage");
        Ok(Self::with_repositories(Repositories::sqlite(&database)))
    }

    /// Application whose state lives only as long as the process.
    pub fn in_memory() -> Self {
        info!("using in-memory storage");
        Self::with_repositories(Repositories::in_memory())
    }

    pub fn with_repositories(repositories: Repositories) -> Self {
        let user_service = UserService::new(repositories.users.clone());
        let film_service = FilmService::new(
            repositories.films.clone(),
            repositories.genres.clone(),
            repositories.ratings.clone(),
        );
        let reference_service =
            ReferenceService::new(repositories.genres.clone(), repositories.ratings.clone());
        let relationship_service = RelationshipService::new(
            repositories.users.clone(),
            repositories.films.clone(),
            repositories.friendships.clone(),
            repositories.likes.clone(),
        );

        Self {
            user_service,
            film_service,
            reference_service,
            relationship_service,
            repositories,
        }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    /// Top films by likes, hydrated with rating and genres
    pub async fn popular_films(&self, count: i64) -> Result<Vec<FilmDetails>, DomainError> {
        let films = self.relationship_service.top_popular(count).await?;
        self.film_service.describe(films).await
    }
}

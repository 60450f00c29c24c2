use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User not found with id: {0}")]
    UserNotFound(i64),

    #[error("Film not found with id: {0}")]
    FilmNotFound(i64),

    #[error("Genre not found with id: {0}")]
    GenreNotFound(i32),

    #[error("MPA rating not found with id: {0}")]
    RatingNotFound(i32),

    #[error("Invalid relation: {0}")]
    InvalidRelation(String),

    #[error("Relation already exists: {0}")]
    DuplicateRelation(String),

    #[error("Relation does not exist: {0}")]
    MissingRelation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Store is inconsistent: {0}")]
    Inconsistency(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl DomainError {
    /// True for every "referenced entity does not exist" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::UserNotFound(_)
                | DomainError::FilmNotFound(_)
                | DomainError::GenreNotFound(_)
                | DomainError::RatingNotFound(_)
        )
    }

    /// Errors caused by the caller's input or by relation state the caller
    /// must reconcile. Everything else is a server-side fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Inconsistency(_) | DomainError::RepositoryError(_)
        )
    }
}

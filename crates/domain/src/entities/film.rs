use crate::entities::{Genre, Rating};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of characters allowed in a film description.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// The first public film screening; no release date may precede it.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32, // minutes
    pub rating_id: Option<i32>,
}

impl Film {
    pub fn new(
        name: String,
        description: Option<String>,
        release_date: NaiveDate,
        duration: i32,
        rating_id: Option<i32>,
    ) -> Self {
        Self {
            id: None,
            name,
            description,
            release_date,
            duration,
            rating_id,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.name.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Film name cannot be empty".to_string(),
            ));
        }

        if let Some(description) = &self.description {
            let length = description.chars().count();
            if length > MAX_DESCRIPTION_LENGTH {
                return Err(crate::DomainError::ValidationError(format!(
                    "Description is {} characters long, maximum is {}",
                    length, MAX_DESCRIPTION_LENGTH
                )));
            }
        }

        if self.release_date < earliest_release_date() {
            return Err(crate::DomainError::ValidationError(
                "Release date cannot be earlier than 1895-12-28".to_string(),
            ));
        }

        if self.duration <= 0 {
            return Err(crate::DomainError::ValidationError(
                "Duration must be a positive number".to_string(),
            ));
        }

        Ok(())
    }
}

/// A film hydrated with its reference data, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmDetails {
    pub film: Film,
    pub rating: Option<Rating>,
    pub genres: Vec<Genre>,
}

impl FilmDetails {
    pub fn id(&self) -> Option<i64> {
        self.film.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film() -> Film {
        Film::new(
            "Arrival of a Train".to_string(),
            Some("Short".to_string()),
            earliest_release_date(),
            1,
            None,
        )
    }

    #[test]
    fn first_screening_date_is_accepted() {
        assert!(film().validate().is_ok());
    }

    #[test]
    fn release_before_first_screening_is_rejected() {
        let mut f = film();
        f.release_date = earliest_release_date().pred_opt().unwrap();
        assert!(f.validate().is_err());
    }

    #[test]
    fn description_limit_counts_characters_not_bytes() {
        let mut f = film();
        f.description = Some("ж".repeat(MAX_DESCRIPTION_LENGTH));
        assert!(f.validate().is_ok());

        f.description = Some("x".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert!(f.validate().is_err());
    }

    #[test]
    fn blank_name_and_non_positive_duration_are_rejected() {
        let mut f = film();
        f.name = "   ".to_string();
        assert!(f.validate().is_err());

        let mut f = film();
        f.duration = 0;
        assert!(f.validate().is_err());
    }
}

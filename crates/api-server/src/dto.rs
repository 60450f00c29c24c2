//! JSON bodies exchanged over HTTP. Field names are camelCase on the wire.

use chrono::NaiveDate;
use domain::{DomainError, Film, FilmDetails, Genre, Rating, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl From<UserRequest> for User {
    fn from(request: UserRequest) -> Self {
        User {
            id: request.id,
            email: request.email.unwrap_or_default(),
            login: request.login.unwrap_or_default(),
            name: request.name.unwrap_or_default(),
            birthday: request.birthday,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Option<i64>,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            login: user.login,
            name: user.name,
            birthday: user.birthday,
        }
    }
}

/// A reference to a genre or rating row by id, as sent by clients.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdRef {
    pub id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i32>,
    pub mpa: Option<IdRef>,
    pub genres: Option<Vec<IdRef>>,
}

impl FilmRequest {
    /// Splits the request into the film record and the requested genre ids.
    pub fn into_parts(self) -> Result<(Film, Option<Vec<i32>>), DomainError> {
        let release_date = self.release_date.ok_or_else(|| {
            DomainError::ValidationError("Release date is required".to_string())
        })?;
        let film = Film {
            id: self.id,
            name: self.name.unwrap_or_default(),
            description: self.description,
            release_date,
            duration: self.duration.unwrap_or_default(),
            rating_id: self.mpa.map(|mpa| mpa.id),
        };
        let genres = self
            .genres
            .map(|genres| genres.into_iter().map(|genre| genre.id).collect());
        Ok((film, genres))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmResponse {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: Option<Rating>,
    pub genres: Vec<Genre>,
}

impl From<FilmDetails> for FilmResponse {
    fn from(details: FilmDetails) -> Self {
        let FilmDetails {
            film,
            rating,
            genres,
        } = details;
        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            mpa: rating,
            genres,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}

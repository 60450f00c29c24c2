use crate::dto::{FilmRequest, FilmResponse, PopularQuery};
use crate::extract::{JsonBody, Path, Query};
use crate::{ApiError, AppState};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

pub async fn list_films(
    State(state): State<AppState>,
) -> Result<Json<Vec<FilmResponse>>, ApiError> {
    let films = state.app.film_service.get_all_films().await?;
    Ok(Json(films.into_iter().map(Into::into).collect()))
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FilmResponse>, ApiError> {
    let film = state.app.film_service.get_film(id).await?;
    Ok(Json(film.into()))
}

pub async fn create_film(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<FilmRequest>,
) -> Result<(StatusCode, Json<FilmResponse>), ApiError> {
    info!(name = ?payload.name, "creating film");
    let (film, genres) = payload.into_parts()?;
    let film = state.app.film_service.create_film(film, genres).await?;
    Ok((StatusCode::CREATED, Json(film.into())))
}

pub async fn update_film(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<FilmRequest>,
) -> Result<Json<FilmResponse>, ApiError> {
    info!(id = ?payload.id, "updating film");
    let (film, genres) = payload.into_parts()?;
    let film = state.app.film_service.update_film(film, genres).await?;
    Ok(Json(film.into()))
}

pub async fn add_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.app.relationship_service.add_like(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_like(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .relationship_service
        .remove_like(id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn popular_films(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<FilmResponse>>, ApiError> {
    let count = query.count.unwrap_or(state.popular_default_count);
    let films = state.app.popular_films(count).await?;
    Ok(Json(films.into_iter().map(Into::into).collect()))
}

use crate::extract::Path;
use crate::{ApiError, AppState};
use axum::{extract::State, Json};
use domain::{Genre, Rating};

pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, ApiError> {
    Ok(Json(state.app.reference_service.all_genres().await?))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Genre>, ApiError> {
    Ok(Json(state.app.reference_service.genre(id).await?))
}

pub async fn list_ratings(State(state): State<AppState>) -> Result<Json<Vec<Rating>>, ApiError> {
    Ok(Json(state.app.reference_service.all_ratings().await?))
}

pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Rating>, ApiError> {
    Ok(Json(state.app.reference_service.rating(id).await?))
}

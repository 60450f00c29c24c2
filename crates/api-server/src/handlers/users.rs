use crate::dto::{UserRequest, UserResponse};
use crate::extract::{JsonBody, Path};
use crate::{ApiError, AppState};
use axum::{extract::State, http::StatusCode, Json};
use domain::User;
use tracing::info;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.app.user_service.get_all_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.app.user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    info!(login = ?payload.login, "creating user");
    let user = state.app.user_service.create_user(User::from(payload)).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    info!(id = ?payload.id, "updating user");
    let user = state.app.user_service.update_user(User::from(payload)).await?;
    Ok(Json(user.into()))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.app.relationship_service.add_friend(id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .relationship_service
        .remove_friend(id, friend_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_friends(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let friends = state.app.relationship_service.friends_of(id).await?;
    Ok(Json(friends.into_iter().map(Into::into).collect()))
}

pub async fn common_friends(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let common = state
        .app
        .relationship_service
        .common_friends(id, other_id)
        .await?;
    Ok(Json(common.into_iter().map(Into::into).collect()))
}

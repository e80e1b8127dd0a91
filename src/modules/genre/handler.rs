use super::dto::{CreateGenreDto, GenreResponse};
use super::service::GenreService;
use crate::common::extract::{Json, Path};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// List all genres
#[utoipa::path(
    get,
    path = "/api/genres",
    responses(
        (status = 200, description = "Genres ordered by name", body = ApiResponse<Vec<GenreResponse>>)
    ),
    tag = "Genres"
)]
pub async fn list_genres(State(state): State<AppState>) -> impl IntoResponse {
    match GenreService::find_all(state).await {
        Ok(genres) => ApiSuccess::ok(genres, "Genres retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreDto,
    responses(
        (status = 200, description = "Genre created", body = ApiResponse<GenreResponse>),
        (status = 400, description = "Bad Request")
    ),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<CreateGenreDto>,
) -> impl IntoResponse {
    match GenreService::create(state, payload).await {
        Ok(genre) => ApiSuccess::ok(genre, "Genre created successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Rename a genre
#[utoipa::path(
    put,
    path = "/api/genres/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = CreateGenreDto,
    responses(
        (status = 200, description = "Genre updated", body = ApiResponse<GenreResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateGenreDto>,
) -> impl IntoResponse {
    match GenreService::update(state, id, payload).await {
        Ok(genre) => ApiSuccess::ok(genre, "Genre updated successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a genre along with its movies
#[utoipa::path(
    delete,
    path = "/api/genres/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre deleted", body = ApiResponse<GenreResponse>),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match GenreService::delete(state, id).await {
        Ok(genre) => ApiSuccess::ok(genre, "Genre deleted successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

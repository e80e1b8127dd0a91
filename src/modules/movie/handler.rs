use super::dto::{GenreFilter, MovieDetailsDto, MovieForm, MovieResponse, MovieUploadForm};
use super::service::MovieService;
use crate::common::extract::{Multipart, Path, Query};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "Movies, best rated first", body = ApiResponse<Vec<MovieDetailsDto>>),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn list_movies(State(state): State<AppState>) -> impl IntoResponse {
    match MovieService::list_movies(state).await {
        Ok(res) => ApiSuccess::ok(res, "Movies retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Get Movie", body = ApiResponse<MovieDetailsDto>),
        (status = 404, description = "Movie Not Found")
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match MovieService::get_movie(state, id).await {
        Ok(res) => ApiSuccess::ok(res, "Movie retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/movies/GetByGenreId",
    params(GenreFilter),
    responses(
        (status = 200, description = "Movies of one genre, best rated first", body = ApiResponse<Vec<MovieDetailsDto>>),
        (status = 400, description = "Bad Request")
    ),
    tag = "Movies"
)]
pub async fn list_movies_by_genre(
    State(state): State<AppState>,
    Query(filter): Query<GenreFilter>,
) -> impl IntoResponse {
    match MovieService::list_by_genre(state, filter.genre_id).await {
        Ok(res) => ApiSuccess::ok(res, "Movies retrieved successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create Movie
/// The poster is required and buffered in memory before it is stored.
#[utoipa::path(
    post,
    path = "/api/movies",
    request_body(content = MovieUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Movie Created", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Bad Request")
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    Multipart(multipart): Multipart,
) -> impl IntoResponse {
    let form = match MovieForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match MovieService::create_movie(state, form).await {
        Ok(res) => ApiSuccess::ok(res, "Movie created successfully").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update Movie
/// Every scalar field is overwritten; the stored poster is kept unless a new one is sent.
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body(content = MovieUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Movie Updated", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found")
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Multipart(multipart): Multipart,
) -> impl IntoResponse {
    let form = match MovieForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match MovieService::update_movie(state, id, form).await {
        Ok(res) => ApiSuccess::ok(res, "Movie updated").into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie Deleted", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Not Found")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match MovieService::delete_movie(state, id).await {
        Ok(res) => ApiSuccess::ok(res, "Movie deleted").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get Movie Poster
/// Serves the stored poster as a raw image
#[utoipa::path(
    get,
    path = "/api/movies/{id}/poster",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Success", body = Vec<u8>, content_type = "image/*"),
        (status = 404, description = "Not Found")
    ),
    tag = "Movies"
)]
pub async fn get_movie_poster(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match MovieService::get_poster(state, id).await {
        Ok((content_type, bytes)) => {
            ([(header::CONTENT_TYPE, content_type.to_string())], bytes).into_response()
        }
        Err(e) => e.into_response(),
    }
}

use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_movies).post(handler::create_movie))
        .route("/GetByGenreId", get(handler::list_movies_by_genre))
        .route(
            "/{id}",
            get(handler::get_movie)
                .put(handler::update_movie)
                .delete(handler::delete_movie),
        )
        .route("/{id}/poster", get(handler::get_movie_poster))
}

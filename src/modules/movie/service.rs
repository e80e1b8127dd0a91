use super::dto::{MovieDetailsDto, MovieForm, MovieResponse};
use super::model::NewMovie;
use crate::common::error::{AppError, Result};
use crate::common::upload::{sniff_image_type, validate_poster};
use crate::state::AppState;
use bytes::Bytes;
use tracing::{info, warn};
use validator::Validate;

pub struct MovieService;

impl MovieService {
    async fn ensure_genre(state: &AppState, genre_id: i32) -> Result<()> {
        if state.genres.find_by_id(genre_id).await?.is_none() {
            warn!("Rejected movie write with unknown genre {}", genre_id);
            return Err(AppError::invalid(format!("invalid genre id: {genre_id}")));
        }
        Ok(())
    }

    pub async fn list_movies(state: AppState) -> Result<Vec<MovieDetailsDto>> {
        let movies = state.movies.find_all_details().await?;

        Ok(movies.into_iter().map(MovieDetailsDto::from).collect())
    }

    pub async fn get_movie(state: AppState, id: i32) -> Result<MovieDetailsDto> {
        let movie = state
            .movies
            .find_details_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("movie", id))?;

        Ok(movie.into())
    }

    pub async fn list_by_genre(state: AppState, genre_id: i32) -> Result<Vec<MovieDetailsDto>> {
        let movies = state.movies.find_details_by_genre(genre_id).await?;

        Ok(movies.into_iter().map(MovieDetailsDto::from).collect())
    }

    pub async fn create_movie(state: AppState, form: MovieForm) -> Result<MovieResponse> {
        let poster = form
            .poster
            .as_ref()
            .ok_or_else(|| AppError::invalid("poster is required"))?;
        validate_poster(&state.config.poster, poster)?;
        form.validate()?;
        Self::ensure_genre(&state, form.genre_id).await?;

        let movie = state
            .movies
            .create(NewMovie {
                poster: poster.data.to_vec(),
                title: form.title,
                year: form.year,
                rate: form.rate,
                store_line: form.store_line,
                genre_id: form.genre_id,
            })
            .await?;
        info!("Created movie {} ({})", movie.id, movie.title);

        Ok(movie.into())
    }

    pub async fn update_movie(state: AppState, id: i32, form: MovieForm) -> Result<MovieResponse> {
        let mut movie = state
            .movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("movie", id))?;

        form.validate()?;
        Self::ensure_genre(&state, form.genre_id).await?;

        if let Some(poster) = &form.poster {
            validate_poster(&state.config.poster, poster)?;
            movie.poster = Some(poster.data.to_vec());
        }

        movie.title = form.title;
        movie.year = form.year;
        movie.rate = form.rate;
        movie.store_line = form.store_line;
        movie.genre_id = form.genre_id;

        let movie = state
            .movies
            .update(&movie)
            .await?
            .ok_or_else(|| AppError::not_found("movie", id))?;
        info!("Updated movie {}", movie.id);

        Ok(movie.into())
    }

    pub async fn delete_movie(state: AppState, id: i32) -> Result<MovieResponse> {
        let movie = state
            .movies
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("movie", id))?;
        info!("Deleted movie {} ({})", movie.id, movie.title);

        Ok(movie.into())
    }

    /// Raw poster bytes with their sniffed content type.
    pub async fn get_poster(state: AppState, id: i32) -> Result<(mime::Mime, Bytes)> {
        let movie = state
            .movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("movie", id))?;

        let poster = movie
            .poster
            .ok_or_else(|| AppError::NotFound(format!("Movie {id} has no poster")))?;

        Ok((sniff_image_type(&poster), Bytes::from(poster)))
    }
}

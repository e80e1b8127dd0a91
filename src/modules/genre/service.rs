use super::dto::{CreateGenreDto, GenreResponse};
use crate::common::error::{AppError, Result};
use crate::state::AppState;
use tracing::info;
use validator::Validate;

pub struct GenreService;

impl GenreService {
    pub async fn find_all(state: AppState) -> Result<Vec<GenreResponse>> {
        let genres = state.genres.find_all().await?;

        Ok(genres.into_iter().map(GenreResponse::from).collect())
    }

    pub async fn create(state: AppState, req: CreateGenreDto) -> Result<GenreResponse> {
        req.validate()?;

        let genre = state.genres.create(&req.name).await?;
        info!("Created genre {} ({})", genre.id, genre.name);

        Ok(genre.into())
    }

    pub async fn update(state: AppState, id: i32, req: CreateGenreDto) -> Result<GenreResponse> {
        req.validate()?;

        let genre = state
            .genres
            .update(id, &req.name)
            .await?
            .ok_or_else(|| AppError::not_found("genre", id))?;

        Ok(genre.into())
    }

    pub async fn delete(state: AppState, id: i32) -> Result<GenreResponse> {
        let genre = state
            .genres
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("genre", id))?;
        info!("Deleted genre {} ({})", genre.id, genre.name);

        Ok(genre.into())
    }
}

use super::model::{Movie, MovieDetails, NewMovie};
use crate::common::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage for movies. Every mutating call commits before returning, and
/// writes reject a `genre_id` with no matching genre as invalid input.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies joined with their genre name, best rated first.
    async fn find_all_details(&self) -> Result<Vec<MovieDetails>>;

    /// Same order and projection as [`MovieRepository::find_all_details`].
    async fn find_details_by_genre(&self, genre_id: i32) -> Result<Vec<MovieDetails>>;

    async fn find_details_by_id(&self, id: i32) -> Result<Option<MovieDetails>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>>;

    async fn create(&self, movie: NewMovie) -> Result<Movie>;

    /// Overwrites every column of the stored row. `None` when the row is gone.
    async fn update(&self, movie: &Movie) -> Result<Option<Movie>>;

    async fn delete(&self, id: i32) -> Result<Option<Movie>>;
}

const DETAILS_SELECT: &str = r#"
    SELECT m.id, m.title, m.year, m.rate, m.store_line, m.genre_id,
           COALESCE(g.name, '') AS genre_name, m.poster
    FROM movies m
    LEFT JOIN genres g ON g.id = m.genre_id
"#;

const MOVIE_COLUMNS: &str = "id, title, year, rate, store_line, genre_id, poster";

pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, genre_id: i32) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::invalid(format!("invalid genre id: {genre_id}"))
        }
        _ => e.into(),
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn find_all_details(&self) -> Result<Vec<MovieDetails>> {
        let movies = sqlx::query_as::<_, MovieDetails>(&format!("{DETAILS_SELECT} ORDER BY m.rate DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(movies)
    }

    async fn find_details_by_genre(&self, genre_id: i32) -> Result<Vec<MovieDetails>> {
        let movies = sqlx::query_as::<_, MovieDetails>(&format!(
            "{DETAILS_SELECT} WHERE m.genre_id = $1 ORDER BY m.rate DESC"
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn find_details_by_id(&self, id: i32) -> Result<Option<MovieDetails>> {
        let movie = sqlx::query_as::<_, MovieDetails>(&format!("{DETAILS_SELECT} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie> {
        let created = sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (title, year, rate, store_line, genre_id, poster)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.rate)
        .bind(&movie.store_line)
        .bind(movie.genre_id)
        .bind(&movie.poster)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, movie.genre_id))?;

        Ok(created)
    }

    async fn update(&self, movie: &Movie) -> Result<Option<Movie>> {
        let updated = sqlx::query_as::<_, Movie>(&format!(
            r#"
            UPDATE movies
            SET
                title = $1,
                year = $2,
                rate = $3,
                store_line = $4,
                genre_id = $5,
                poster = $6
            WHERE id = $7
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.rate)
        .bind(&movie.store_line)
        .bind(movie.genre_id)
        .bind(&movie.poster)
        .bind(movie.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, movie.genre_id))?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "DELETE FROM movies WHERE id = $1 RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }
}

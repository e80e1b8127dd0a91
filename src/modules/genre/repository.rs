use super::model::Genre;
use crate::common::error::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Storage for genres. Every mutating call commits before returning.
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// All genres ordered by name ascending.
    async fn find_all(&self) -> Result<Vec<Genre>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>>;

    async fn create(&self, name: &str) -> Result<Genre>;

    /// `None` when no genre has that id.
    async fn update(&self, id: i32, name: &str) -> Result<Option<Genre>>;

    /// Returns the removed genre, `None` when no genre has that id.
    async fn delete(&self, id: i32) -> Result<Option<Genre>>;
}

pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT id, name
            FROM genres
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(genre)
    }

    async fn create(&self, name: &str) -> Result<Genre> {
        let genre = sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(genre)
    }

    async fn update(&self, id: i32, name: &str) -> Result<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>(
            r#"
            UPDATE genres
            SET name = $1
            WHERE id = $2
            RETURNING id, name
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(genre)
    }

    async fn delete(&self, id: i32) -> Result<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("DELETE FROM genres WHERE id = $1 RETURNING id, name")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(genre)
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::error::{AppError, Result};
use crate::modules::genre::model::Genre;
use crate::modules::genre::repository::GenreRepository;
use crate::modules::movie::model::{Movie, MovieDetails, NewMovie};
use crate::modules::movie::repository::MovieRepository;

#[derive(Default)]
struct Tables {
    genres: BTreeMap<i32, Genre>,
    movies: BTreeMap<i32, Movie>,
    last_genre_id: i32,
    last_movie_id: i32,
}

impl Tables {
    fn details(&self, movie: &Movie) -> MovieDetails {
        MovieDetails {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            rate: movie.rate,
            store_line: movie.store_line.clone(),
            genre_id: movie.genre_id,
            genre_name: self
                .genres
                .get(&movie.genre_id)
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            poster: movie.poster.clone(),
        }
    }

    fn details_where(&self, filter: impl Fn(&Movie) -> bool) -> Vec<MovieDetails> {
        let mut movies: Vec<MovieDetails> = self
            .movies
            .values()
            .filter(|&m| filter(m))
            .map(|m| self.details(m))
            .collect();
        movies.sort_by(|a, b| b.rate.total_cmp(&a.rate));
        movies
    }

    fn check_genre(&self, genre_id: i32) -> Result<()> {
        if self.genres.contains_key(&genre_id) {
            Ok(())
        } else {
            Err(AppError::invalid(format!("invalid genre id: {genre_id}")))
        }
    }
}

/// In-memory store backing both repositories, used by tests and `memory://` runs.
///
/// Clones share the same tables. Genre deletion cascades to its movies, and
/// movie writes check the genre under the same write lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GenreRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Genre>> {
        let tables = self.tables.read().await;
        let mut genres: Vec<Genre> = tables.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>> {
        Ok(self.tables.read().await.genres.get(&id).cloned())
    }

    async fn create(&self, name: &str) -> Result<Genre> {
        let mut tables = self.tables.write().await;
        tables.last_genre_id += 1;
        let genre = Genre {
            id: tables.last_genre_id,
            name: name.to_string(),
        };
        tables.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update(&self, id: i32, name: &str) -> Result<Option<Genre>> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.get_mut(&id).map(|genre| {
            genre.name = name.to_string();
            genre.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Genre>> {
        let mut tables = self.tables.write().await;
        let removed = tables.genres.remove(&id);
        if removed.is_some() {
            tables.movies.retain(|_, m| m.genre_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn find_all_details(&self) -> Result<Vec<MovieDetails>> {
        Ok(self.tables.read().await.details_where(|_| true))
    }

    async fn find_details_by_genre(&self, genre_id: i32) -> Result<Vec<MovieDetails>> {
        Ok(self
            .tables
            .read()
            .await
            .details_where(|m| m.genre_id == genre_id))
    }

    async fn find_details_by_id(&self, id: i32) -> Result<Option<MovieDetails>> {
        let tables = self.tables.read().await;
        Ok(tables.movies.get(&id).map(|m| tables.details(m)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie> {
        let mut tables = self.tables.write().await;
        tables.check_genre(movie.genre_id)?;

        tables.last_movie_id += 1;
        let movie = Movie {
            id: tables.last_movie_id,
            title: movie.title,
            year: movie.year,
            rate: movie.rate,
            store_line: movie.store_line,
            genre_id: movie.genre_id,
            poster: Some(movie.poster),
        };
        tables.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update(&self, movie: &Movie) -> Result<Option<Movie>> {
        let mut tables = self.tables.write().await;
        if !tables.movies.contains_key(&movie.id) {
            return Ok(None);
        }
        tables.check_genre(movie.genre_id)?;

        tables.movies.insert(movie.id, movie.clone());
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Movie>> {
        Ok(self.tables.write().await.movies.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_movie(title: &str, rate: f64, genre_id: i32) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 2000,
            rate,
            store_line: String::new(),
            genre_id,
            poster: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_incrementally() {
        let store = MemoryStore::new();
        let a = GenreRepository::create(&store, "A").await.unwrap();
        let b = GenreRepository::create(&store, "B").await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = MemoryStore::new();
        let a = GenreRepository::create(&store, "A").await.unwrap();
        GenreRepository::delete(&store, a.id).await.unwrap();
        let b = GenreRepository::create(&store, "B").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn movie_write_with_missing_genre_fails() {
        let store = MemoryStore::new();
        let err = MovieRepository::create(&store, new_movie("X", 1.0, 9))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(store.find_all_details().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_genre_cascades_to_movies() {
        let store = MemoryStore::new();
        let drama = GenreRepository::create(&store, "Drama").await.unwrap();
        let comedy = GenreRepository::create(&store, "Comedy").await.unwrap();
        MovieRepository::create(&store, new_movie("D", 1.0, drama.id)).await.unwrap();
        MovieRepository::create(&store, new_movie("C", 2.0, comedy.id)).await.unwrap();

        GenreRepository::delete(&store, drama.id).await.unwrap();

        let left = store.find_all_details().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].title, "C");
    }

    #[tokio::test]
    async fn details_join_genre_name() {
        let store = MemoryStore::new();
        let drama = GenreRepository::create(&store, "Drama").await.unwrap();
        let movie = MovieRepository::create(&store, new_movie("X", 8.5, drama.id))
            .await
            .unwrap();

        let details = store.find_details_by_id(movie.id).await.unwrap().unwrap();
        assert_eq!(details.genre_name, "Drama");
        assert_eq!(details.poster, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn update_of_missing_movie_returns_none() {
        let store = MemoryStore::new();
        let drama = GenreRepository::create(&store, "Drama").await.unwrap();
        let movie = Movie {
            id: 5,
            title: "X".into(),
            year: 1,
            rate: 1.0,
            store_line: String::new(),
            genre_id: drama.id,
            poster: None,
        };
        assert!(MovieRepository::update(&store, &movie).await.unwrap().is_none());
    }
}

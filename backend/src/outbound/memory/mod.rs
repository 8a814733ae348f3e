//! In-process movie repository.
//!
//! Used when no database is configured and by integration tests. It enforces
//! the same slug uniqueness as the `movies_slug_idx` index so the catalogue
//! behaves the same against either adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{MovieRepository, MovieRepositoryError};
use crate::domain::{Movie, MovieId, Slug};

/// [`MovieRepository`] backed by a lock-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<HashMap<MovieId, Movie>>,
}

impl InMemoryMovieRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn slug_owner<'a>(
        movies: &'a HashMap<MovieId, Movie>,
        slug: &Slug,
    ) -> Option<&'a Movie> {
        movies.values().find(|movie| movie.slug() == slug)
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn create(&self, movie: &Movie) -> Result<(), MovieRepositoryError> {
        let mut movies = self.movies.write().await;
        if Self::slug_owner(&movies, movie.slug()).is_some() {
            return Err(MovieRepositoryError::duplicate_slug(movie.slug().as_str()));
        }
        if movies.contains_key(&movie.id()) {
            return Err(MovieRepositoryError::query(format!(
                "movie {} already stored",
                movie.id()
            )));
        }
        movies.insert(movie.id(), movie.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieRepositoryError> {
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Movie>, MovieRepositoryError> {
        let movies = self.movies.read().await;
        Ok(Self::slug_owner(&movies, slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieRepositoryError> {
        let mut listed: Vec<Movie> = self.movies.read().await.values().cloned().collect();
        listed.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(&b.id())));
        Ok(listed)
    }

    async fn update(&self, movie: &Movie) -> Result<bool, MovieRepositoryError> {
        let mut movies = self.movies.write().await;
        if !movies.contains_key(&movie.id()) {
            return Ok(false);
        }
        if Self::slug_owner(&movies, movie.slug()).is_some_and(|owner| owner.id() != movie.id()) {
            return Err(MovieRepositoryError::duplicate_slug(movie.slug().as_str()));
        }
        movies.insert(movie.id(), movie.clone());
        Ok(true)
    }

    async fn delete_by_id(&self, id: &MovieId) -> Result<bool, MovieRepositoryError> {
        Ok(self.movies.write().await.remove(id).is_some())
    }

    async fn exists_by_id(&self, id: &MovieId) -> Result<bool, MovieRepositoryError> {
        Ok(self.movies.read().await.contains_key(id))
    }
}

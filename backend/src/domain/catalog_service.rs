//! Movie catalogue service.
//!
//! Implements the movie driving ports on top of a [`MovieRepository`]. Every
//! mutation is validated first, so slug uniqueness is checked optimistically
//! and then enforced by storage, whose rejection surfaces as
//! [`CatalogError::Conflict`].
//!
//! Writes run on their own Tokio task. Once a write has been issued, dropping
//! the caller's future does not cancel it.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    MovieCommand, MovieLookup, MovieQuery, MovieRepository, MovieRepositoryError,
};
use crate::domain::{
    CatalogError, Movie, MovieDraft, MovieId, MovieValidator, RepositorySlugAvailability,
    SlugAvailability, TraceId,
};

/// Movie catalogue implementing [`MovieCommand`] and [`MovieQuery`].
pub struct MovieCatalogService<R, A = RepositorySlugAvailability<R>> {
    repo: Arc<R>,
    validator: MovieValidator<A>,
}

impl<R> MovieCatalogService<R>
where
    R: MovieRepository,
{
    /// Create a catalogue whose slug checks read from `repo`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use movie_catalog::domain::MovieCatalogService;
    /// # use movie_catalog::domain::ports::FixtureMovieRepository;
    /// let service = MovieCatalogService::new(
    ///     Arc::new(FixtureMovieRepository),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        let slugs = Arc::new(RepositorySlugAvailability::new(Arc::clone(&repo)));
        Self {
            repo,
            validator: MovieValidator::new(clock, slugs),
        }
    }
}

impl<R, A> MovieCatalogService<R, A> {
    /// Create a catalogue with a caller-supplied validator.
    pub fn with_validator(repo: Arc<R>, validator: MovieValidator<A>) -> Self {
        Self { repo, validator }
    }
}

impl<R, A> Clone for MovieCatalogService<R, A> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            validator: self.validator.clone(),
        }
    }
}

impl<R, A> MovieCatalogService<R, A>
where
    R: MovieRepository + 'static,
    A: SlugAvailability,
{
    async fn ensure_valid(&self, movie: &Movie) -> Result<(), CatalogError> {
        let violations = self.validator.validate(movie).await?;
        if violations.is_empty() {
            return Ok(());
        }
        debug!(
            movie_id = %movie.id(),
            slug = %movie.slug(),
            violations = violations.len(),
            "movie rejected by validation"
        );
        Err(CatalogError::Validation { violations })
    }

    /// Run a repository write on its own task, carrying the trace id along.
    async fn detached<T, F, Fut>(&self, write: F) -> Result<T, CatalogError>
    where
        F: FnOnce(Arc<R>) -> Fut,
        Fut: Future<Output = Result<T, MovieRepositoryError>> + Send + 'static,
        T: Send + 'static,
    {
        let task = tokio::spawn(TraceId::inherit(write(Arc::clone(&self.repo))));
        match task.await {
            Ok(result) => result.map_err(CatalogError::from),
            Err(err) => Err(CatalogError::Storage(MovieRepositoryError::query(format!(
                "movie write task did not complete: {err}"
            )))),
        }
    }
}

fn log_write_failure(operation: &str, id: MovieId, error: &CatalogError) {
    match error {
        CatalogError::Conflict { slug } => {
            warn!(movie_id = %id, slug = %slug, operation, "storage rejected duplicate slug");
        }
        CatalogError::Storage(err) => {
            warn!(movie_id = %id, operation, error = %err, "movie write failed");
        }
        CatalogError::Validation { .. } | CatalogError::NotFound { .. } => {}
    }
}

fn not_found(id: MovieId) -> CatalogError {
    CatalogError::NotFound {
        lookup: MovieLookup::ById(id),
    }
}

#[async_trait]
impl<R, A> MovieCommand for MovieCatalogService<R, A>
where
    R: MovieRepository + 'static,
    A: SlugAvailability,
{
    async fn create(&self, draft: MovieDraft) -> Result<Movie, CatalogError> {
        let movie = Movie::new(MovieId::random(), draft);
        let id = movie.id();
        self.ensure_valid(&movie).await?;

        let created = self
            .detached(move |repo| async move { repo.create(&movie).await.map(|()| movie) })
            .await
            .inspect_err(|err| log_write_failure("create", id, err))?;

        info!(movie_id = %id, slug = %created.slug(), "movie created");
        Ok(created)
    }

    async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, CatalogError> {
        let movie = Movie::new(id, draft);
        self.ensure_valid(&movie).await?;

        if !self.repo.exists_by_id(&id).await? {
            return Err(not_found(id));
        }

        let updated = self
            .detached(move |repo| async move {
                repo.update(&movie).await.map(|existed| existed.then_some(movie))
            })
            .await
            .inspect_err(|err| log_write_failure("update", id, err))?
            .ok_or_else(|| not_found(id))?;

        info!(movie_id = %id, slug = %updated.slug(), "movie updated");
        Ok(updated)
    }

    async fn delete(&self, id: MovieId) -> Result<(), CatalogError> {
        let existed = self
            .detached(move |repo| async move { repo.delete_by_id(&id).await })
            .await
            .inspect_err(|err| log_write_failure("delete", id, err))?;

        if !existed {
            return Err(not_found(id));
        }
        info!(movie_id = %id, "movie deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, A> MovieQuery for MovieCatalogService<R, A>
where
    R: MovieRepository + 'static,
    A: SlugAvailability,
{
    async fn get(&self, lookup: MovieLookup) -> Result<Movie, CatalogError> {
        let found = match &lookup {
            MovieLookup::ById(id) => self.repo.find_by_id(id).await?,
            MovieLookup::BySlug(slug) => self.repo.find_by_slug(slug).await?,
        };
        found.ok_or(CatalogError::NotFound { lookup })
    }

    async fn list(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(self.repo.list_all().await?)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;

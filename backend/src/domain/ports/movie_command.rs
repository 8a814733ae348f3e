//! Driving port for movie mutations.
//!
//! Inbound adapters hand the catalogue already-parsed drafts and ids. The
//! catalogue assigns ids on create, validates every write, and reports
//! failures as [`CatalogError`] values.

use async_trait::async_trait;

use crate::domain::{CatalogError, Movie, MovieDraft, MovieId};

use super::MovieLookup;

/// Driving port for movie create, update, and delete operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), movie_catalog::domain::CatalogError> {
/// use movie_catalog::domain::MovieDraft;
/// use movie_catalog::domain::ports::{FixtureMovieCommand, MovieCommand};
///
/// let movie = FixtureMovieCommand
///     .create(MovieDraft {
///         title: "Jaws".to_owned(),
///         year_of_release: 1975,
///         genres: vec!["Thriller".to_owned()],
///     })
///     .await?;
/// assert_eq!(movie.slug().as_ref(), "jaws");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCommand: Send + Sync {
    /// Validate and store a new movie under a freshly generated id.
    async fn create(&self, draft: MovieDraft) -> Result<Movie, CatalogError>;

    /// Replace the mutable fields of an existing movie, keeping its id.
    async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, CatalogError>;

    /// Delete a movie by id.
    async fn delete(&self, id: MovieId) -> Result<(), CatalogError>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Creates echo the draft back without storing it; updates and deletes find
/// nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMovieCommand;

#[async_trait]
impl MovieCommand for FixtureMovieCommand {
    async fn create(&self, draft: MovieDraft) -> Result<Movie, CatalogError> {
        Ok(Movie::new(MovieId::random(), draft))
    }

    async fn update(&self, id: MovieId, _draft: MovieDraft) -> Result<Movie, CatalogError> {
        Err(CatalogError::NotFound {
            lookup: MovieLookup::ById(id),
        })
    }

    async fn delete(&self, id: MovieId) -> Result<(), CatalogError> {
        Err(CatalogError::NotFound {
            lookup: MovieLookup::ById(id),
        })
    }
}

//! Driving port for movie read operations.
//!
//! Inbound adapters resolve their own addressing scheme into a
//! [`MovieLookup`] before calling the catalogue.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{CatalogError, Movie, MovieId, Slug};

/// Explicit lookup key for a single movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieLookup {
    /// Look the movie up by its identifier.
    ById(MovieId),
    /// Look the movie up by its slug.
    BySlug(Slug),
}

impl fmt::Display for MovieLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "with id {id}"),
            Self::BySlug(slug) => write!(f, "with slug {slug}"),
        }
    }
}

/// Driving port for movie read operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), movie_catalog::domain::CatalogError> {
/// use movie_catalog::domain::ports::{FixtureMovieQuery, MovieQuery};
///
/// let movies = FixtureMovieQuery.list().await?;
/// assert!(movies.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieQuery: Send + Sync {
    /// Fetch one movie by id or slug.
    async fn get(&self, lookup: MovieLookup) -> Result<Movie, CatalogError>;

    /// List every movie ordered by title, then id.
    async fn list(&self) -> Result<Vec<Movie>, CatalogError>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMovieQuery;

#[async_trait]
impl MovieQuery for FixtureMovieQuery {
    async fn get(&self, lookup: MovieLookup) -> Result<Movie, CatalogError> {
        Err(CatalogError::NotFound { lookup })
    }

    async fn list(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::derive_slug;

    #[rstest]
    #[tokio::test]
    async fn fixture_query_reports_missing_movie() {
        let lookup = MovieLookup::BySlug(derive_slug("Jaws"));
        let err = FixtureMovieQuery
            .get(lookup.clone())
            .await
            .expect_err("fixture never finds movies");
        assert_eq!(err, CatalogError::NotFound { lookup });
    }

    #[rstest]
    fn lookup_display_names_the_key() {
        let id = MovieId::random();
        assert_eq!(MovieLookup::ById(id).to_string(), format!("with id {id}"));
        assert_eq!(
            MovieLookup::BySlug(derive_slug("Jaws")).to_string(),
            "with slug jaws"
        );
    }
}

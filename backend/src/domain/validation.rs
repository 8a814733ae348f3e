//! Movie validation rules.
//!
//! [`MovieValidator`] runs every rule against a candidate [`Movie`] and
//! returns all violations together. The slug uniqueness rule needs storage,
//! so it is expressed through the [`SlugAvailability`] port and the
//! validator is async.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use serde::Serialize;

use super::ports::{MovieRepository, MovieRepositoryError};
use super::{Movie, MovieId, Slug};

/// A single rule a candidate movie failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieViolation {
    /// The title was empty once trimmed.
    EmptyTitle,
    /// No genres were supplied.
    EmptyGenres,
    /// A genre name was blank.
    BlankGenre {
        /// Zero-based index of the blank entry.
        position: usize,
    },
    /// The release year is after the current UTC year.
    ReleaseYearInFuture {
        /// Year supplied by the caller.
        year: i32,
        /// UTC year at validation time.
        current_year: i32,
    },
    /// Another movie already owns the derived slug.
    DuplicateSlug {
        /// Slug already held by another movie.
        slug: Slug,
    },
}

impl MovieViolation {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyGenres | Self::BlankGenre { .. } => "genres",
            Self::ReleaseYearInFuture { .. } => "yearOfRelease",
            Self::DuplicateSlug { .. } => "slug",
        }
    }

    /// Stable machine-readable violation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::EmptyGenres => "required",
            Self::BlankGenre { .. } => "blank",
            Self::ReleaseYearInFuture { .. } => "in_future",
            Self::DuplicateSlug { .. } => "duplicate",
        }
    }
}

impl fmt::Display for MovieViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyGenres => write!(f, "at least one genre is required"),
            Self::BlankGenre { position } => {
                write!(f, "genre at position {position} must not be blank")
            }
            Self::ReleaseYearInFuture { year, current_year } => write!(
                f,
                "year of release {year} must not be later than {current_year}"
            ),
            Self::DuplicateSlug { slug } => {
                write!(f, "a movie with slug {slug} already exists")
            }
        }
    }
}

/// Serialisable view of a violation for error payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationDetail {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Stable rule identifier.
    pub code: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl From<&MovieViolation> for ViolationDetail {
    fn from(value: &MovieViolation) -> Self {
        Self {
            field: value.field(),
            code: value.code(),
            message: value.to_string(),
        }
    }
}

/// Answers whether a slug may be used by a given movie.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugAvailability: Send + Sync {
    /// Return `true` when no movie other than `owner` holds `slug`.
    async fn is_available(
        &self,
        slug: &Slug,
        owner: &MovieId,
    ) -> Result<bool, MovieRepositoryError>;
}

/// [`SlugAvailability`] backed by a [`MovieRepository`] slug lookup.
pub struct RepositorySlugAvailability<R> {
    repo: Arc<R>,
}

impl<R> RepositorySlugAvailability<R> {
    /// Check slugs against `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> Clone for RepositorySlugAvailability<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

#[async_trait]
impl<R> SlugAvailability for RepositorySlugAvailability<R>
where
    R: MovieRepository,
{
    async fn is_available(
        &self,
        slug: &Slug,
        owner: &MovieId,
    ) -> Result<bool, MovieRepositoryError> {
        let holder = self.repo.find_by_slug(slug).await?;
        Ok(holder.is_none_or(|movie| movie.id() == *owner))
    }
}

/// Runs the catalogue rules against candidate movies.
pub struct MovieValidator<A> {
    clock: Arc<dyn Clock>,
    slugs: Arc<A>,
}

impl<A> Clone for MovieValidator<A> {
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            slugs: Arc::clone(&self.slugs),
        }
    }
}

impl<A> MovieValidator<A>
where
    A: SlugAvailability,
{
    /// Build a validator reading the current year from `clock`.
    pub fn new(clock: Arc<dyn Clock>, slugs: Arc<A>) -> Self {
        Self { clock, slugs }
    }

    /// Evaluate every rule and return the violations in rule order.
    ///
    /// An empty vector means the candidate is valid. The slug rule is skipped
    /// for empty titles because their slug carries no meaning.
    pub async fn validate(&self, movie: &Movie) -> Result<Vec<MovieViolation>, MovieRepositoryError> {
        let mut violations = Vec::new();

        let has_title = !movie.title().trim().is_empty();
        if !has_title {
            violations.push(MovieViolation::EmptyTitle);
        }

        if movie.genres().is_empty() {
            violations.push(MovieViolation::EmptyGenres);
        }
        violations.extend(
            movie
                .genres()
                .iter()
                .enumerate()
                .filter(|(_, genre)| genre.trim().is_empty())
                .map(|(position, _)| MovieViolation::BlankGenre { position }),
        );

        let current_year = self.clock.utc().year();
        if movie.year_of_release() > current_year {
            violations.push(MovieViolation::ReleaseYearInFuture {
                year: movie.year_of_release(),
                current_year,
            });
        }

        if has_title && !self.slugs.is_available(movie.slug(), &movie.id()).await? {
            violations.push(MovieViolation::DuplicateSlug {
                slug: movie.slug().clone(),
            });
        }

        Ok(violations)
    }
}

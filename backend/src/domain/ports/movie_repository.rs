//! Port abstraction for movie persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Movie, MovieId, Slug};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by movie repository adapters.
    pub enum MovieRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "movie repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "movie repository query failed: {message}",
        /// The storage uniqueness constraint on slugs rejected a write.
        DuplicateSlug { slug: String } => "movie slug already stored: {slug}",
    }
}

/// Port for reading and writing catalogue entries.
///
/// Absent rows are reported through `Option` or `bool` results, never as
/// errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Insert a new movie together with its genres.
    async fn create(&self, movie: &Movie) -> Result<(), MovieRepositoryError>;

    /// Fetch a movie by identifier.
    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieRepositoryError>;

    /// Fetch the movie currently owning `slug`.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Movie>, MovieRepositoryError>;

    /// List every stored movie ordered by title, then id.
    ///
    /// Titles compare by Unicode code point, so `Zodiac` sorts before
    /// `alien`; adapters must not apply locale collation.
    async fn list_all(&self) -> Result<Vec<Movie>, MovieRepositoryError>;

    /// Replace the mutable fields of an existing movie.
    ///
    /// Returns `false` when no movie with the id exists.
    async fn update(&self, movie: &Movie) -> Result<bool, MovieRepositoryError>;

    /// Delete a movie by identifier.
    ///
    /// Returns `false` when no movie with the id exists.
    async fn delete_by_id(&self, id: &MovieId) -> Result<bool, MovieRepositoryError>;

    /// Report whether a movie with the id exists.
    async fn exists_by_id(&self, id: &MovieId) -> Result<bool, MovieRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Writes succeed without storing anything and reads find nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMovieRepository;

#[async_trait]
impl MovieRepository for FixtureMovieRepository {
    async fn create(&self, _movie: &Movie) -> Result<(), MovieRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &MovieId) -> Result<Option<Movie>, MovieRepositoryError> {
        Ok(None)
    }

    async fn find_by_slug(&self, _slug: &Slug) -> Result<Option<Movie>, MovieRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieRepositoryError> {
        Ok(Vec::new())
    }

    async fn update(&self, _movie: &Movie) -> Result<bool, MovieRepositoryError> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: &MovieId) -> Result<bool, MovieRepositoryError> {
        Ok(false)
    }

    async fn exists_by_id(&self, _id: &MovieId) -> Result<bool, MovieRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::{MovieDraft, derive_slug};

    fn jaws() -> Movie {
        Movie::new(
            MovieId::random(),
            MovieDraft {
                title: "Jaws".to_owned(),
                year_of_release: 1975,
                genres: vec!["Thriller".to_owned()],
            },
        )
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_find_nothing() {
        let repo = FixtureMovieRepository;
        let by_id = repo
            .find_by_id(&MovieId::random())
            .await
            .expect("fixture lookup succeeds");
        let by_slug = repo
            .find_by_slug(&derive_slug("Jaws"))
            .await
            .expect("fixture lookup succeeds");
        assert!(by_id.is_none());
        assert!(by_slug.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_writes_report_missing_rows() {
        let repo = FixtureMovieRepository;
        let movie = jaws();

        repo.create(&movie).await.expect("fixture create succeeds");
        assert!(!repo.update(&movie).await.expect("fixture update succeeds"));
        assert!(
            !repo
                .delete_by_id(&movie.id())
                .await
                .expect("fixture delete succeeds")
        );
    }

    #[rstest]
    #[case(MovieRepositoryError::connection("refused"), "refused")]
    #[case(MovieRepositoryError::query("broken sql"), "broken sql")]
    #[case(MovieRepositoryError::duplicate_slug("jaws"), "jaws")]
    fn errors_format_message(#[case] err: MovieRepositoryError, #[case] fragment: &str) {
        assert!(err.to_string().contains(fragment));
    }
}

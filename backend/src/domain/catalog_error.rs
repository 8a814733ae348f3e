//! Failures reported by the movie catalogue.

use serde_json::json;

use super::ports::{MovieLookup, MovieRepositoryError};
use super::{Error, MovieViolation, Slug, ViolationDetail};

/// Failure outcome of a catalogue operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The candidate movie broke one or more rules.
    #[error("movie failed validation with {} violation(s)", violations.len())]
    Validation {
        /// Every rule the candidate broke.
        violations: Vec<MovieViolation>,
    },
    /// No movie matched the lookup.
    #[error("movie {lookup} not found")]
    NotFound {
        /// Lookup that matched nothing.
        lookup: MovieLookup,
    },
    /// Storage rejected a write because the slug was taken after validation.
    #[error("movie slug {slug} is already taken")]
    Conflict {
        /// Slug the storage constraint rejected.
        slug: Slug,
    },
    /// Storage could not complete the operation.
    #[error(transparent)]
    Storage(MovieRepositoryError),
}

/// Slug constraint rejections become [`CatalogError::Conflict`]; every other
/// repository failure is a storage error.
impl From<MovieRepositoryError> for CatalogError {
    fn from(value: MovieRepositoryError) -> Self {
        match value {
            MovieRepositoryError::DuplicateSlug { slug } => match Slug::new(slug.clone()) {
                Ok(slug) => Self::Conflict { slug },
                Err(_) => Self::Storage(MovieRepositoryError::DuplicateSlug { slug }),
            },
            other => Self::Storage(other),
        }
    }
}

impl From<CatalogError> for Error {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::Validation { violations } => {
                let details: Vec<ViolationDetail> =
                    violations.iter().map(ViolationDetail::from).collect();
                Error::invalid_request("movie failed validation")
                    .with_details(json!({ "violations": details }))
            }
            CatalogError::NotFound { lookup } => {
                Error::not_found(format!("movie {lookup} not found"))
            }
            CatalogError::Conflict { slug } => {
                Error::conflict(format!("movie slug {slug} is already taken"))
                    .with_details(json!({ "slug": slug }))
            }
            CatalogError::Storage(MovieRepositoryError::Connection { .. }) => {
                Error::service_unavailable("movie storage is unavailable")
            }
            CatalogError::Storage(other) => Error::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for catalogue error mapping.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{ErrorCode, MovieId, derive_slug};

    #[rstest]
    fn validation_maps_to_invalid_request_with_every_violation() {
        let error = Error::from(CatalogError::Validation {
            violations: vec![
                MovieViolation::EmptyTitle,
                MovieViolation::EmptyGenres,
            ],
        });

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({
                "violations": [
                    { "field": "title", "code": "required", "message": "title must not be empty" },
                    { "field": "genres", "code": "required", "message": "at least one genre is required" },
                ]
            }))
        );
    }

    #[rstest]
    #[case(
        CatalogError::NotFound { lookup: MovieLookup::ById(MovieId::random()) },
        ErrorCode::NotFound
    )]
    #[case(CatalogError::Conflict { slug: derive_slug("Jaws") }, ErrorCode::Conflict)]
    #[case(
        CatalogError::Storage(MovieRepositoryError::connection("refused")),
        ErrorCode::ServiceUnavailable
    )]
    #[case(
        CatalogError::Storage(MovieRepositoryError::query("syntax")),
        ErrorCode::InternalError
    )]
    fn maps_to_domain_error_codes(#[case] error: CatalogError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn connection_failures_stay_storage_errors() {
        let error = CatalogError::from(MovieRepositoryError::connection("refused"));
        assert_eq!(
            error,
            CatalogError::Storage(MovieRepositoryError::connection("refused"))
        );
    }

    #[rstest]
    fn conversion_reads_slug_from_duplicate_error() {
        let error = CatalogError::from(MovieRepositoryError::duplicate_slug("jaws"));
        assert_eq!(error, CatalogError::Conflict { slug: derive_slug("Jaws") });
    }
}

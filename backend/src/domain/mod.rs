//! Domain primitives, rules, and the movie catalogue service.
//!
//! Purpose: Define the strongly typed movie model, the validation rules that
//! keep slugs unique, and the catalogue service that orchestrates them over
//! the repository port. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Movie, MovieId, MovieDraft, Genres: the catalogue entry and its parts.
//! - Slug and `derive_slug`: title-derived identifiers.
//! - MovieValidator, SlugAvailability: validation rules.
//! - CatalogError: failure outcomes of catalogue operations.
//! - MovieCatalogService: implementation of the movie driving ports.

pub mod catalog_error;
pub mod catalog_service;
pub mod error;
pub mod movie;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod validation;

pub use self::catalog_error::CatalogError;
pub use self::catalog_service::MovieCatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::movie::{Genres, Movie, MovieDraft, MovieId, MovieIdParseError, MovieParts};
pub use self::slug::{Slug, SlugValidationError, derive_slug};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{
    MovieValidator, MovieViolation, RepositorySlugAvailability, SlugAvailability,
    ViolationDetail,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use movie_catalog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! Movie DTOs and path parsing helpers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::MovieLookup;
use crate::domain::{Error, Movie, MovieDraft, MovieId, Slug};

#[derive(Debug, Deserialize)]
pub(super) struct MoviePath {
    pub(super) id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MovieLookupPath {
    pub(super) id_or_slug: String,
}

/// Request payload for creating or replacing a movie.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    /// Display title.
    #[schema(example = "Jaws")]
    pub title: String,
    /// Release year; must not be after the current UTC year.
    #[schema(example = 1975)]
    pub year_of_release: i32,
    /// Non-empty list of genre names.
    #[schema(example = json!(["Thriller"]))]
    pub genres: Vec<String>,
}

impl From<MovieRequest> for MovieDraft {
    fn from(value: MovieRequest) -> Self {
        Self {
            title: value.title,
            year_of_release: value.year_of_release,
            genres: value.genres,
        }
    }
}

/// Response payload describing a stored movie.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    /// Movie identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Slug derived from the title.
    #[schema(example = "jaws")]
    pub slug: String,
    /// Release year.
    pub year_of_release: i32,
    /// Genre names in display order.
    pub genres: Vec<String>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        let parts = movie.into_parts();
        Self {
            id: parts.id.to_string(),
            title: parts.title,
            slug: parts.slug.into(),
            year_of_release: parts.year_of_release,
            genres: parts.genres.into(),
        }
    }
}

/// Response payload listing every stored movie.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MovieListResponse {
    /// Movies ordered by title.
    pub items: Vec<MovieResponse>,
}

impl From<Vec<Movie>> for MovieListResponse {
    fn from(movies: Vec<Movie>) -> Self {
        Self {
            items: movies.into_iter().map(MovieResponse::from).collect(),
        }
    }
}

/// Interpret a path token as an id when it is a hyphenated UUID, otherwise as
/// a slug.
///
/// Tokens that are neither cannot name any stored movie.
pub(super) fn parse_lookup(token: &str) -> Result<MovieLookup, Error> {
    if let Ok(id) = MovieId::parse(token) {
        return Ok(MovieLookup::ById(id));
    }
    Slug::new(token)
        .map(MovieLookup::BySlug)
        .map_err(|_| unknown_movie(token))
}

/// Parse the `{id}` segment of a mutation route.
pub(super) fn parse_movie_id(path: &MoviePath) -> Result<MovieId, Error> {
    MovieId::parse(&path.id).map_err(|_| unknown_movie(&path.id))
}

fn unknown_movie(token: &str) -> Error {
    Error::not_found(format!("movie {token} not found"))
}

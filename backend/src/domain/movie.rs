//! Movie data model.
//!
//! A [`Movie`] is built from a caller-supplied [`MovieDraft`] plus an id the
//! catalogue assigns. Construction normalises the fields and derives the slug
//! from the title; it never rejects input. Business rules live in
//! [`crate::domain::MovieValidator`] so every violation can be reported at
//! once.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Slug, derive_slug};

/// Length of the hyphenated textual form of a UUID.
const HYPHENATED_ID_LEN: usize = 36;

/// Error returned by [`MovieId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("movie id must be a hyphenated UUID")]
pub struct MovieIdParseError;

/// Stable movie identifier.
///
/// # Examples
/// ```
/// use movie_catalog::domain::MovieId;
///
/// let id = MovieId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(MovieId::parse("jaws").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(Uuid);

impl MovieId {
    /// Generate a new random [`MovieId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the hyphenated textual form of a movie id.
    ///
    /// Braced, URN, and unhyphenated forms are rejected so that only tokens
    /// shaped exactly like rendered ids are treated as ids.
    pub fn parse(value: &str) -> Result<Self, MovieIdParseError> {
        if value.len() != HYPHENATED_ID_LEN {
            return Err(MovieIdParseError);
        }
        Uuid::try_parse(value)
            .map(Self)
            .map_err(|_| MovieIdParseError)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for MovieId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Genres attached to a movie.
///
/// Entries are trimmed and duplicates collapse to their first occurrence.
/// Insertion order is kept for display, but equality ignores it.
///
/// # Examples
/// ```
/// use movie_catalog::domain::Genres;
///
/// let a = Genres::new(["Thriller", "Horror", "Thriller"]);
/// let b = Genres::new(["Horror", " Thriller "]);
/// assert_eq!(a.as_slice(), ["Thriller", "Horror"]);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Genres(Vec<String>);

impl Genres {
    /// Build a genre list from arbitrary names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !genres.iter().any(|existing| existing == name) {
                genres.push(name.to_owned());
            }
        }
        Self(genres)
    }

    /// Borrow the genres in display order.
    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Iterate over the genres in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct genres.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no genres at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` is one of the genres.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|genre| genre == name)
    }
}

impl PartialEq for Genres {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|genre| other.contains(genre))
    }
}

impl Eq for Genres {}

impl From<Vec<String>> for Genres {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

impl From<Genres> for Vec<String> {
    fn from(value: Genres) -> Self {
        value.0
    }
}

/// Caller-supplied movie fields before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    /// Display title; the slug is derived from it.
    pub title: String,
    /// Calendar year the movie came out.
    pub year_of_release: i32,
    /// Genre names in display order.
    pub genres: Vec<String>,
}

/// Persisted movie fields used by storage adapters to rebuild a [`Movie`].
///
/// The slug is taken as stored rather than re-derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieParts {
    /// Stored identifier.
    pub id: MovieId,
    /// Stored slug.
    pub slug: Slug,
    /// Trimmed title.
    pub title: String,
    /// Calendar year the movie came out.
    pub year_of_release: i32,
    /// Deduplicated genres.
    pub genres: Genres,
}

/// Catalogue entry.
///
/// ## Invariants
/// - `slug` is `derive_slug(title)` for movies built through [`Movie::new`].
/// - `id` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    id: MovieId,
    slug: Slug,
    title: String,
    year_of_release: i32,
    genres: Genres,
}

impl Movie {
    /// Build a movie candidate from a draft, trimming the title and deriving
    /// the slug.
    ///
    /// # Examples
    /// ```
    /// use movie_catalog::domain::{Movie, MovieDraft, MovieId};
    ///
    /// let movie = Movie::new(
    ///     MovieId::random(),
    ///     MovieDraft {
    ///         title: " Jaws ".to_owned(),
    ///         year_of_release: 1975,
    ///         genres: vec!["Thriller".to_owned()],
    ///     },
    /// );
    /// assert_eq!(movie.title(), "Jaws");
    /// assert_eq!(movie.slug().as_ref(), "jaws");
    /// ```
    pub fn new(id: MovieId, draft: MovieDraft) -> Self {
        let MovieDraft {
            title,
            year_of_release,
            genres,
        } = draft;
        let title = title.trim().to_owned();
        Self {
            id,
            slug: derive_slug(&title),
            title,
            year_of_release,
            genres: Genres::new(genres),
        }
    }

    /// Rebuild a movie from stored fields.
    pub fn from_parts(parts: MovieParts) -> Self {
        let MovieParts {
            id,
            slug,
            title,
            year_of_release,
            genres,
        } = parts;
        Self {
            id,
            slug,
            title,
            year_of_release,
            genres,
        }
    }

    /// Decompose the movie into its stored fields.
    pub fn into_parts(self) -> MovieParts {
        MovieParts {
            id: self.id,
            slug: self.slug,
            title: self.title,
            year_of_release: self.year_of_release,
            genres: self.genres,
        }
    }

    /// Movie identifier.
    pub fn id(&self) -> MovieId {
        self.id
    }

    /// Slug derived from the title.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Trimmed title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Release year.
    pub fn year_of_release(&self) -> i32 {
        self.year_of_release
    }

    /// Genres in display order.
    pub fn genres(&self) -> &Genres {
        &self.genres
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, genres: &[&str]) -> MovieDraft {
        MovieDraft {
            title: title.to_owned(),
            year_of_release: 1975,
            genres: genres.iter().map(|genre| (*genre).to_owned()).collect(),
        }
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("3FA85F64-5717-4562-B3FC-2C963F66AFA6", true)]
    #[case("3fa85f6457174562b3fc2c963f66afa6", false)]
    #[case("{3fa85f64-5717-4562-b3fc-2c963f66afa6}", false)]
    #[case("jaws", false)]
    #[case("", false)]
    fn parse_accepts_only_hyphenated_ids(#[case] value: &str, #[case] accepted: bool) {
        assert_eq!(MovieId::parse(value).is_ok(), accepted);
    }

    #[rstest]
    fn display_renders_lowercase_hyphenated() {
        let id = MovieId::parse("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn genres_collapse_duplicates_in_order() {
        let genres = Genres::new(["Drama", " Thriller", "Drama", "Thriller "]);
        assert_eq!(genres.as_slice(), ["Drama", "Thriller"]);
    }

    #[rstest]
    #[case(&["Thriller", "Horror"], &["Horror", "Thriller"], true)]
    #[case(&["Thriller"], &["Thriller", "Horror"], false)]
    #[case(&["Thriller", "Thriller"], &["Thriller"], true)]
    fn genre_equality_ignores_order(
        #[case] left: &[&str],
        #[case] right: &[&str],
        #[case] equal: bool,
    ) {
        assert_eq!(Genres::new(left) == Genres::new(right), equal);
    }

    #[rstest]
    fn new_derives_slug_from_trimmed_title() {
        let movie = Movie::new(MovieId::random(), draft("  The Thing ", &["Horror"]));
        assert_eq!(movie.title(), "The Thing");
        assert_eq!(movie.slug(), &derive_slug("The Thing"));
    }

    #[rstest]
    fn parts_round_trip_preserves_stored_slug() {
        let movie = Movie::new(MovieId::random(), draft("Jaws", &["Thriller"]));
        let parts = movie.clone().into_parts();
        assert_eq!(Movie::from_parts(parts), movie);
    }
}

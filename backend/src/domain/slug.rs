//! Slugs: human-readable movie identifiers derived from titles.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. [`derive_slug`] is the only way the catalogue
//! produces them, and it is a pure function of the title: no clock, no
//! randomness, no stored state.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix used when a title has no ASCII letters or digits to keep.
const FALLBACK_PREFIX: &str = "title-";
/// Number of hex digits of the title digest kept in fallback slugs.
const FALLBACK_DIGEST_LEN: usize = 12;
/// Suffix appended to slugs that would otherwise read as a movie id.
const ID_SHAPED_SUFFIX: &str = "-film";

/// Validation errors returned by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// The slug was empty or surrounded by whitespace.
    #[error("slug must be a trimmed, non-empty string")]
    Empty,
    /// The slug contained characters outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase ASCII letters, digits, or hyphens")]
    InvalidCharacters,
}

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Validated movie slug.
///
/// # Examples
/// ```
/// use movie_catalog::domain::Slug;
///
/// let slug = Slug::new("the-thing").expect("valid slug");
/// assert_eq!(slug.as_ref(), "the-thing");
/// assert!(Slug::new("The Thing").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`].
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        Self::from_owned(value.into())
    }

    fn from_owned(value: String) -> Result<Self, SlugValidationError> {
        if !is_trimmed_non_empty(&value) {
            return Err(SlugValidationError::Empty);
        }
        if !has_allowed_slug_chars(&value) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Derive the slug for a movie title.
///
/// ASCII letters and digits are kept and lower-cased. Whitespace, hyphens, and
/// underscores separate words and collapse into a single hyphen. All other
/// characters are dropped without separating words, so apostrophes and colons
/// vanish. A title with nothing left to keep falls back to `title-` plus a
/// digest prefix of the trimmed title. A result that parses as a UUID gains a
/// `-film` suffix so slugs never collide with movie ids.
///
/// # Examples
/// ```
/// use movie_catalog::domain::derive_slug;
///
/// assert_eq!(derive_slug("Jaws").as_ref(), "jaws");
/// assert_eq!(derive_slug("Schindler's List").as_ref(), "schindlers-list");
/// assert_eq!(derive_slug("  Jaws:  The Revenge ").as_ref(), "jaws-the-revenge");
/// ```
pub fn derive_slug(title: &str) -> Slug {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        slug = fallback_slug(title);
    } else if Uuid::try_parse(&slug).is_ok() {
        slug.push_str(ID_SHAPED_SUFFIX);
    }

    Slug(slug)
}

fn fallback_slug(title: &str) -> String {
    let digest = hex::encode(Sha256::digest(title.trim().as_bytes()));
    let short = digest.get(..FALLBACK_DIGEST_LEN).unwrap_or(&digest);
    format!("{FALLBACK_PREFIX}{short}")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for slug derivation and validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Jaws", "jaws")]
    #[case("JAWS", "jaws")]
    #[case("The Thing", "the-thing")]
    #[case("  The   Thing  ", "the-thing")]
    #[case("Schindler's List", "schindlers-list")]
    #[case("Jaws: The Revenge", "jaws-the-revenge")]
    #[case("Mission - Impossible", "mission-impossible")]
    #[case("snake_case_title", "snake-case-title")]
    #[case("2001: A Space Odyssey", "2001-a-space-odyssey")]
    #[case("Amélie", "amlie")]
    #[case("--Leading and trailing--", "leading-and-trailing")]
    fn derives_expected_slug(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(derive_slug(title).as_str(), expected);
    }

    #[rstest]
    #[case("Jaws")]
    #[case("七人の侍")]
    #[case("!!!")]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn derived_slugs_are_valid(#[case] title: &str) {
        let slug = derive_slug(title);
        assert!(is_valid_slug(slug.as_str()), "invalid slug {slug}");
    }

    #[rstest]
    fn derivation_is_deterministic() {
        let title = "Once Upon a Time... in Hollywood";
        assert_eq!(derive_slug(title), derive_slug(title));
    }

    #[rstest]
    fn titles_without_ascii_use_digest_fallback() {
        let slug = derive_slug("七人の侍");
        assert!(slug.as_str().starts_with(FALLBACK_PREFIX));
        assert_eq!(slug.as_str().len(), FALLBACK_PREFIX.len() + FALLBACK_DIGEST_LEN);
        assert_ne!(slug, derive_slug("東京物語"));
    }

    #[rstest]
    fn fallback_ignores_surrounding_whitespace() {
        assert_eq!(derive_slug("  !!!  "), derive_slug("!!!"));
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("3fa85f6457174562b3fc2c963f66afa6")]
    fn id_shaped_titles_never_produce_id_shaped_slugs(#[case] title: &str) {
        let slug = derive_slug(title);
        assert!(Uuid::try_parse(slug.as_str()).is_err());
        assert!(slug.as_str().ends_with(ID_SHAPED_SUFFIX));
    }

    #[rstest]
    #[case("", SlugValidationError::Empty)]
    #[case(" jaws", SlugValidationError::Empty)]
    #[case("Jaws", SlugValidationError::InvalidCharacters)]
    #[case("jaws!", SlugValidationError::InvalidCharacters)]
    fn rejects_invalid_slugs(#[case] value: &str, #[case] expected: SlugValidationError) {
        assert_eq!(Slug::new(value), Err(expected));
    }
}

//! Internal Diesel row structs.
//!
//! These never leave the persistence layer.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{genres, movies};

/// Row read from `movies`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MovieRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub year_of_release: i32,
}

/// Insertable `movies` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = movies)]
pub(crate) struct NewMovieRow<'a> {
    pub id: Uuid,
    pub slug: &'a str,
    pub title: &'a str,
    pub year_of_release: i32,
}

/// Changeset replacing the mutable `movies` columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = movies)]
pub(crate) struct MovieUpdate<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub year_of_release: i32,
}

/// Row read from `genres`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GenreRow {
    pub movie_id: Uuid,
    pub position: i32,
    pub name: String,
}

/// Insertable `genres` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = genres)]
pub(crate) struct NewGenreRow<'a> {
    pub movie_id: Uuid,
    pub position: i32,
    pub name: &'a str,
}

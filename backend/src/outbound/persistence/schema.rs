//! Diesel table definitions for the movie catalogue schema.
//!
//! These must match `migrations/` exactly.

diesel::table! {
    /// Catalogue entries. `slug` carries the unique index `movies_slug_idx`.
    movies (id) {
        id -> Uuid,
        slug -> Text,
        title -> Text,
        year_of_release -> Int4,
    }
}

diesel::table! {
    /// Genre names per movie, ordered by `position`.
    genres (movie_id, position) {
        movie_id -> Uuid,
        position -> Int4,
        name -> Text,
    }
}

diesel::joinable!(genres -> movies (movie_id));
diesel::allow_tables_to_appear_in_same_query!(genres, movies);

//! PostgreSQL-backed `MovieRepository` implementation using Diesel ORM.
//!
//! A movie spans one `movies` row and its ordered `genres` rows. Writes touch
//! both tables inside one transaction. Slug uniqueness is enforced by the
//! `movies_slug_idx` unique index; its violations surface as
//! [`MovieRepositoryError::DuplicateSlug`].
//!
//! Reads issue two SELECTs, so they run in a read-only `REPEATABLE READ`
//! transaction. Under `READ COMMITTED` each statement takes its own snapshot
//! and an update committed in between would pair old movie fields with new
//! genres.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{MovieRepository, MovieRepositoryError};
use crate::domain::{Genres, Movie, MovieId, MovieParts, Slug};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{GenreRow, MovieRow, MovieUpdate, NewGenreRow, NewMovieRow};
use super::pool::{DbPool, PoolError};
use super::schema::{genres, movies};

/// Name of the unique index guarding movie slugs.
pub const SLUG_INDEX: &str = "movies_slug_idx";

/// Diesel-backed implementation of the movie repository port.
#[derive(Clone)]
pub struct DieselMovieRepository {
    pool: DbPool,
}

impl DieselMovieRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MovieRepositoryError {
    map_basic_pool_error(error, |message| MovieRepositoryError::connection(message))
}

fn is_slug_violation(error: &DieselError) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name() == Some(SLUG_INDEX) || info.message().contains(SLUG_INDEX)
        }
        _ => false,
    }
}

/// Map Diesel errors raised while writing `slug`.
fn map_write_error(error: DieselError, slug: &Slug) -> MovieRepositoryError {
    if is_slug_violation(&error) {
        return MovieRepositoryError::duplicate_slug(slug.as_str());
    }
    map_read_error(error)
}

/// Map Diesel errors raised by statements that cannot violate the slug index.
fn map_read_error(error: DieselError) -> MovieRepositoryError {
    map_basic_diesel_error(
        &error,
        MovieRepositoryError::query,
        MovieRepositoryError::connection,
    )
    .unwrap_or_else(|| MovieRepositoryError::query("duplicate record"))
}

fn genre_rows(movie: &Movie) -> Result<Vec<NewGenreRow<'_>>, MovieRepositoryError> {
    let movie_id = *movie.id().as_uuid();
    movie
        .genres()
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let position = i32::try_from(position)
                .map_err(|_| MovieRepositoryError::query("too many genres to store"))?;
            Ok(NewGenreRow {
                movie_id,
                position,
                name,
            })
        })
        .collect()
}

fn row_to_movie(row: MovieRow, genre_names: Vec<String>) -> Result<Movie, MovieRepositoryError> {
    let MovieRow {
        id,
        slug,
        title,
        year_of_release,
    } = row;
    let slug = Slug::new(slug)
        .map_err(|err| MovieRepositoryError::query(format!("invalid slug in database: {err}")))?;

    Ok(Movie::from_parts(MovieParts {
        id: MovieId::from_uuid(id),
        slug,
        title,
        year_of_release,
        genres: Genres::new(genre_names),
    }))
}

/// Load the genre rows belonging to `rows` in position order.
async fn load_genres(
    conn: &mut AsyncPgConnection,
    rows: Vec<MovieRow>,
) -> Result<(Vec<MovieRow>, Vec<GenreRow>), DieselError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let genre_rows = genres::table
        .filter(genres::movie_id.eq_any(ids))
        .order((genres::movie_id, genres::position))
        .select(GenreRow::as_select())
        .load(conn)
        .await?;
    Ok((rows, genre_rows))
}

/// Attach genres to movie rows, keeping row order.
fn assemble(
    rows: Vec<MovieRow>,
    genre_rows: Vec<GenreRow>,
) -> Result<Vec<Movie>, MovieRepositoryError> {
    let mut by_movie: HashMap<Uuid, Vec<String>> = HashMap::with_capacity(rows.len());
    for GenreRow { movie_id, name, .. } in genre_rows {
        by_movie.entry(movie_id).or_default().push(name);
    }

    rows.into_iter()
        .map(|row| {
            let names = by_movie.remove(&row.id).unwrap_or_default();
            row_to_movie(row, names)
        })
        .collect()
}

async fn insert_genres(
    conn: &mut AsyncPgConnection,
    rows: &[NewGenreRow<'_>],
) -> Result<(), DieselError> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(genres::table)
        .values(rows)
        .execute(conn)
        .await
        .map(|_| ())
}

#[async_trait]
impl MovieRepository for DieselMovieRepository {
    async fn create(&self, movie: &Movie) -> Result<(), MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewMovieRow {
            id: *movie.id().as_uuid(),
            slug: movie.slug().as_str(),
            title: movie.title(),
            year_of_release: movie.year_of_release(),
        };
        let genre_rows = genre_rows(movie)?;

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                diesel::insert_into(movies::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                insert_genres(conn, &genre_rows).await
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_write_error(err, movie.slug()))
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *id.as_uuid();

        let (rows, genre_rows) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run::<_, DieselError, _>(|conn| {
                async move {
                    let rows = movies::table
                        .filter(movies::id.eq(id))
                        .select(MovieRow::as_select())
                        .load(conn)
                        .await?;
                    load_genres(conn, rows).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_read_error)?;

        Ok(assemble(rows, genre_rows)?.into_iter().next())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Movie>, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let slug = slug.as_str();

        let (rows, genre_rows) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run::<_, DieselError, _>(|conn| {
                async move {
                    let rows = movies::table
                        .filter(movies::slug.eq(slug))
                        .select(MovieRow::as_select())
                        .load(conn)
                        .await?;
                    load_genres(conn, rows).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_read_error)?;

        Ok(assemble(rows, genre_rows)?.into_iter().next())
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, genre_rows) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run::<_, DieselError, _>(|conn| {
                async move {
                    let rows = movies::table
                        .order((movies::title, movies::id))
                        .select(MovieRow::as_select())
                        .load(conn)
                        .await?;
                    load_genres(conn, rows).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_read_error)?;

        assemble(rows, genre_rows)
    }

    async fn update(&self, movie: &Movie) -> Result<bool, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *movie.id().as_uuid();
        let changes = MovieUpdate {
            slug: movie.slug().as_str(),
            title: movie.title(),
            year_of_release: movie.year_of_release(),
        };
        let genre_rows = genre_rows(movie)?;

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let updated = diesel::update(movies::table.find(id))
                    .set(&changes)
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                diesel::delete(genres::table.filter(genres::movie_id.eq(id)))
                    .execute(conn)
                    .await?;
                insert_genres(conn, &genre_rows).await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_write_error(err, movie.slug()))
    }

    async fn delete_by_id(&self, id: &MovieId) -> Result<bool, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Genre rows go with the movie through `ON DELETE CASCADE`.
        let deleted = diesel::delete(movies::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(deleted > 0)
    }

    async fn exists_by_id(&self, id: &MovieId) -> Result<bool, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(movies::table.find(*id.as_uuid())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_read_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for movie repository error mapping.
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use crate::domain::derive_slug;

    struct ConstraintError {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ConstraintError {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("movies")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(message: &'static str, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintError {
                message,
                constraint,
            }),
        )
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, MovieRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case(unique_violation("duplicate key value", Some(SLUG_INDEX)))]
    #[case(unique_violation(
        "duplicate key value violates unique constraint \"movies_slug_idx\"",
        None
    ))]
    fn slug_index_violation_maps_to_duplicate_slug(#[case] error: DieselError) {
        let slug = derive_slug("Jaws");
        let err = map_write_error(error, &slug);

        assert_eq!(err, MovieRepositoryError::duplicate_slug("jaws"));
    }

    #[rstest]
    fn other_unique_violations_map_to_query_error() {
        let slug = derive_slug("Jaws");
        let err = map_write_error(unique_violation("duplicate key", Some("movies_pkey")), &slug);

        assert!(matches!(err, MovieRepositoryError::Query { .. }));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );

        assert!(matches!(
            map_read_error(error),
            MovieRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_read_error(DieselError::NotFound);

        assert!(matches!(err, MovieRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn stored_rows_rebuild_movies() {
        let id = Uuid::new_v4();
        let movie = row_to_movie(
            MovieRow {
                id,
                slug: "jaws".to_owned(),
                title: "Jaws".to_owned(),
                year_of_release: 1975,
            },
            vec!["Thriller".to_owned(), "Horror".to_owned()],
        )
        .expect("valid row");

        assert_eq!(movie.id(), MovieId::from_uuid(id));
        assert_eq!(movie.slug().as_str(), "jaws");
        assert_eq!(movie.genres().as_slice(), ["Thriller", "Horror"]);
    }

    #[rstest]
    fn corrupt_slugs_are_query_errors() {
        let result = row_to_movie(
            MovieRow {
                id: Uuid::new_v4(),
                slug: "Not A Slug".to_owned(),
                title: "Jaws".to_owned(),
                year_of_release: 1975,
            },
            Vec::new(),
        );

        assert!(matches!(result, Err(MovieRepositoryError::Query { .. })));
    }
}

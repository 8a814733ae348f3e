//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the movie repository port on PostgreSQL through `diesel-async`
//! with `bb8` connection pooling. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module; only domain types
//! cross the boundary, and every database failure is mapped to
//! [`crate::domain::ports::MovieRepositoryError`].
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use movie_catalog::outbound::persistence::{DbPool, DieselMovieRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/movies")).await?;
//! let repo = DieselMovieRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_movie_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_movie_repository::{DieselMovieRepository, SLUG_INDEX};
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

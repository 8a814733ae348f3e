//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod movie_command;
mod movie_query;
mod movie_repository;

#[cfg(test)]
pub use movie_command::MockMovieCommand;
pub use movie_command::{FixtureMovieCommand, MovieCommand};
#[cfg(test)]
pub use movie_query::MockMovieQuery;
pub use movie_query::{FixtureMovieQuery, MovieLookup, MovieQuery};
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
pub use movie_repository::{FixtureMovieRepository, MovieRepository, MovieRepositoryError};

//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureMovieCommand, FixtureMovieQuery, MovieCommand, MovieQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Write side of the catalogue.
    pub movies: Arc<dyn MovieCommand>,
    /// Read side of the catalogue.
    pub movies_query: Arc<dyn MovieQuery>,
}

impl HttpState {
    /// Construct state from the movie driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use movie_catalog::domain::MovieCatalogService;
    /// use movie_catalog::inbound::http::state::HttpState;
    /// use movie_catalog::outbound::memory::InMemoryMovieRepository;
    ///
    /// let service = Arc::new(MovieCatalogService::new(
    ///     Arc::new(InMemoryMovieRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _movies = state.movies.clone();
    /// ```
    pub fn new(movies: Arc<dyn MovieCommand>, movies_query: Arc<dyn MovieQuery>) -> Self {
        Self {
            movies,
            movies_query,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureMovieCommand), Arc::new(FixtureMovieQuery))
    }
}

//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use movie_catalog::Trace;
#[cfg(debug_assertions)]
use movie_catalog::doc::ApiDoc;
use movie_catalog::domain::MovieCatalogService;
use movie_catalog::domain::ports::MovieRepository;
use movie_catalog::inbound::http::error::json_error_handler;
use movie_catalog::inbound::http::health::{HealthState, live, ready};
use movie_catalog::inbound::http::movies;
use movie_catalog::inbound::http::state::HttpState;
use movie_catalog::outbound::memory::InMemoryMovieRepository;
use movie_catalog::outbound::persistence::DieselMovieRepository;

fn catalogue_state<R>(repo: R) -> HttpState
where
    R: MovieRepository + 'static,
{
    let service = Arc::new(MovieCatalogService::new(
        Arc::new(repo),
        Arc::new(DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}

/// Pick the repository adapter: PostgreSQL when a pool is configured,
/// otherwise an in-process map.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("serving movies from PostgreSQL");
            catalogue_state(DieselMovieRepository::new(pool.clone()))
        }
        None => {
            info!("no database configured; serving movies from memory");
            catalogue_state(InMemoryMovieRepository::new())
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(web::scope("/api").configure(movies::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    info!(bind_addr = %config.bind_addr, "movie catalogue listening");
    Ok(server)
}

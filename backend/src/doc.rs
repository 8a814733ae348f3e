//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the movie and health endpoints together with the
//! schema wrappers for domain types ([`ErrorSchema`], [`ErrorCodeSchema`],
//! [`ViolationSchema`]) so domain code never depends on utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::movies::{MovieListResponse, MovieRequest, MovieResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ViolationSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie catalogue API",
        description = "Create, look up by id or slug, update, and delete movies.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::create_movie,
        crate::inbound::http::movies::list_movies,
        crate::inbound::http::movies::get_movie,
        crate::inbound::http::movies::update_movie,
        crate::inbound::http::movies::delete_movie,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MovieRequest,
        MovieResponse,
        MovieListResponse,
        ErrorSchema,
        ErrorCodeSchema,
        ViolationSchema
    )),
    tags(
        (name = "movies", description = "Movie catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

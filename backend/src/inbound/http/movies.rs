//! Movie catalogue HTTP handlers.
//!
//! ```text
//! POST   /api/movies
//! GET    /api/movies
//! GET    /api/movies/{idOrSlug}
//! PUT    /api/movies/{id}
//! DELETE /api/movies/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::MovieDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

pub use super::movies_dto::{MovieListResponse, MovieRequest, MovieResponse};
use super::movies_dto::{MovieLookupPath, MoviePath, parse_lookup, parse_movie_id};

/// Path prefix under which the movie handlers are mounted.
pub const MOVIES_PATH: &str = "/api/movies";

/// Register every movie handler on a service config.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use movie_catalog::inbound::http::movies;
///
/// let app = App::new().service(web::scope("/api").configure(movies::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_movie)
        .service(list_movies)
        .service(get_movie)
        .service(update_movie)
        .service(delete_movie);
}

/// Create a movie; its slug is derived from the title.
#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = MovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse,
            headers(("Location" = String, description = "URL of the new movie"))),
        (status = 400, description = "Movie failed validation", body = ErrorSchema),
        (status = 409, description = "Slug taken by a concurrent write", body = ErrorSchema),
        (status = 503, description = "Movie storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "createMovie"
)]
#[post("/movies")]
pub async fn create_movie(
    state: web::Data<HttpState>,
    payload: web::Json<MovieRequest>,
) -> ApiResult<HttpResponse> {
    let movie = state
        .movies
        .create(MovieDraft::from(payload.into_inner()))
        .await?;
    let location = format!("{MOVIES_PATH}/{}", movie.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(MovieResponse::from(movie)))
}

/// List every movie ordered by title.
#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "Stored movies", body = MovieListResponse),
        (status = 503, description = "Movie storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "listMovies"
)]
#[get("/movies")]
pub async fn list_movies(state: web::Data<HttpState>) -> ApiResult<web::Json<MovieListResponse>> {
    let movies = state.movies_query.list().await?;
    Ok(web::Json(MovieListResponse::from(movies)))
}

/// Fetch a movie by id (hyphenated UUID) or by slug.
#[utoipa::path(
    get,
    path = "/api/movies/{idOrSlug}",
    params(("idOrSlug" = String, Path, description = "Movie id or slug")),
    responses(
        (status = 200, description = "Movie", body = MovieResponse),
        (status = 404, description = "No movie matches", body = ErrorSchema),
        (status = 503, description = "Movie storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "getMovie"
)]
#[get("/movies/{idOrSlug}")]
pub async fn get_movie(
    state: web::Data<HttpState>,
    path: web::Path<MovieLookupPath>,
) -> ApiResult<web::Json<MovieResponse>> {
    let lookup = parse_lookup(&path.id_or_slug)?;
    let movie = state.movies_query.get(lookup).await?;
    Ok(web::Json(MovieResponse::from(movie)))
}

/// Replace a movie's title, release year and genres.
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(("id" = uuid::Uuid, Path, description = "Movie id")),
    request_body = MovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Movie failed validation", body = ErrorSchema),
        (status = 404, description = "No movie with this id", body = ErrorSchema),
        (status = 409, description = "Slug taken by a concurrent write", body = ErrorSchema),
        (status = 503, description = "Movie storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "updateMovie"
)]
#[put("/movies/{id}")]
pub async fn update_movie(
    state: web::Data<HttpState>,
    path: web::Path<MoviePath>,
    payload: web::Json<MovieRequest>,
) -> ApiResult<web::Json<MovieResponse>> {
    let id = parse_movie_id(&path)?;
    let movie = state
        .movies
        .update(id, MovieDraft::from(payload.into_inner()))
        .await?;
    Ok(web::Json(MovieResponse::from(movie)))
}

/// Delete a movie.
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(("id" = uuid::Uuid, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 404, description = "No movie with this id", body = ErrorSchema),
        (status = 503, description = "Movie storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["movies"],
    operation_id = "deleteMovie"
)]
#[delete("/movies/{id}")]
pub async fn delete_movie(
    state: web::Data<HttpState>,
    path: web::Path<MoviePath>,
) -> ApiResult<HttpResponse> {
    let id = parse_movie_id(&path)?;
    state.movies.delete(id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "movies_tests.rs"]
mod tests;

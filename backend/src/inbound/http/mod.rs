//! HTTP inbound adapter exposing the movie catalogue as REST endpoints.

pub mod error;
pub mod health;
pub mod movies;
mod movies_dto;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

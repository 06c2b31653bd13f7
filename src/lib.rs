use axum::{Router, http::StatusCode, middleware::from_fn_with_state, routing::get};

pub mod auth;
pub mod error;
pub mod integration;
pub mod message;
pub mod pagination;
pub mod state;
pub mod thread;
pub mod user;

#[cfg(test)]
mod fake;

pub use error::Error;
use state::AppState;

pub type Result<T> = std::result::Result<T, Error>;

/// Builds the full router: authenticated `/api` routes plus the public health check.
pub fn app(s: AppState) -> Router {
    let api = Router::new()
        .merge(thread::api(s.clone()))
        .merge(message::api(s.clone()))
        .route_layer(from_fn_with_state(s.clone(), auth::middleware::authorize));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

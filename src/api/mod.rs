//! HTTP API module: the hello endpoint plus health check.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;

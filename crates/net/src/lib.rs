//! ActivityHub REST boundary
//!
//! Thin axum layer over the core engine, plus the server binary.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

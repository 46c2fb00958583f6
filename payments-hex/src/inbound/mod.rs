//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod handlers;
pub mod query;
mod server;

pub use handlers::{ApiError, AppState};
pub use server::HttpServer;

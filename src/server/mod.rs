//! HTTP server for the order API
//!
//! This module provides:
//! - the order handlers and their shared [`AppState`]
//! - the route table
//! - a `ServerBuilder` wrapping the routes in CORS and request-trace layers

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_order_routes;

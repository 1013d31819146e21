//! HTTP server module
//!
//! Routing and request handling for the gateway:
//! - Channel listing and public config endpoints
//! - Allow-listed stream relay
//! - Stream probe with bounded retries
//! - CORS and request tracing middleware

pub mod handlers;
pub mod proxy;
pub mod routes;

pub use routes::create_router;

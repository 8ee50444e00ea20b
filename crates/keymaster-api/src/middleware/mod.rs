//! Middleware for request logging and cross-origin handling

pub mod cors;
pub mod logging;

pub use cors::cors_layer;
pub use logging::{REQUEST_ID_HEADER, request_logging_middleware};

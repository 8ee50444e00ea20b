//! HTTP request handlers

pub mod health;
pub mod scopes;

pub use health::{health_check, readiness_check};
pub use scopes::{list_scopes, suggest_scopes};

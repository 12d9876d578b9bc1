//! HTTP layer for the Serein task tracker.
//!
//! Thin axum wiring around `serein-core`: routing, state, error mapping and
//! the request handlers.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{build_router, AppState};

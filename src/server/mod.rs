//! HTTP server
//!
//! Router, listener and request handlers in front of the file store.

pub mod core;
pub mod handlers;
pub mod render;

pub use self::core::{AppState, Server, build_router};

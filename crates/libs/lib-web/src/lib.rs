//! # Web Library
//!
//! HTTP handlers, middleware, server assembly, and web services for the
//! record shop API.

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

#[cfg(test)]
pub(crate) mod test_utils;

pub use server::{create_router, init_tracing, start_server, AppState, ServerConfig};

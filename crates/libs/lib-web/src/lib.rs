//! # Web Library
//!
//! HTTP handlers, middleware, the authentication service, and server startup.

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{build_gateway, create_router, start_server, AppState, ServerConfig};
pub use services::{AuthGateway, AuthOutcome};

//! Bazaar Server Library
//!
//! Regional marketplace HTTP server: accounts, product listings, store
//! browsing and atomic purchase settlement over a partitioned SQLite store.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::AuthService;
pub use state::AppState;

// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod auth;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod game;
pub mod routes;
pub mod server;

// Convenient re-exports for frequently used types.
pub use config::Args;
pub use error::ApiError;
pub use server::AppState;

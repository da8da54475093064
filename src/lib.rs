pub mod config;
pub mod core;
pub mod handlers;
pub mod init;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::{ConfigError, EngineConfig};
pub use core::*;
pub use state::AppState;

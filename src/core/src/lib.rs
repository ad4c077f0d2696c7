//! nodeload core - foundational types shared by the runtime and the CLI.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{LoadConfig, NodeConfig, NodeNamer, NodeRole, RuntimeConfig, DEFAULT_CLUSTER_NAME};
pub use error::{LoadError, Result};

/// nodeload version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

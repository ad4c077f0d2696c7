//! nodeload runtime - loads host container images into cluster nodes.
//!
//! This crate provides the per-node concurrent loading orchestration, image
//! reference normalization and retag decisions, plus a container-runtime
//! backend for clusters whose nodes are containers.

pub mod container;
pub mod image;
pub mod load;
pub mod node;

// Re-export common types
pub use container::{ContainerImageSource, ContainerNodeProvider};
pub use image::{decide, normalize, CanonicalReference, ImageSource, ImageTags, RetagDecision};
pub use load::{run_until_first_error, ImageLoader, LoadTask};
pub use node::{resolve, Node, NodeProvider};

/// nodeload runtime version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

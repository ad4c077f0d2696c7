//! Container runtime backend.
//!
//! Implements `NodeProvider` and `ImageSource` on top of a docker-compatible
//! CLI (docker, podman, nerdctl) for clusters whose nodes are containers.

mod command;
mod provider;
mod source;

pub use provider::{ContainerNodeProvider, CLUSTER_LABEL};
pub use source::ContainerImageSource;

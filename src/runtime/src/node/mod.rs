//! Cluster nodes.
//!
//! Nodes are owned by the cluster provider; this crate only looks them up by
//! name and hands them back to the provider for image operations.

mod provider;
pub mod resolve;

use std::fmt;

pub use provider::NodeProvider;
pub use resolve::{nodes_by_name, resolve};

/// Handle to a running cluster node, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

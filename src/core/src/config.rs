//! Cluster load configuration.
//!
//! Mirrors the node section of the provisioning tool's cluster file:
//!
//! ```yaml
//! name: dev
//! nodes:
//!   - role: control-plane
//!     loadImages: [nginx:1.25]
//!   - role: worker
//!     loadImages: [my-app:dev, redis]
//! runtime:
//!   binary: podman
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Cluster name used when none is given.
pub const DEFAULT_CLUSTER_NAME: &str = "kind";

/// Role a node plays in the cluster; part of the node's container name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    ControlPlane,
    Worker,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::ControlPlane => "control-plane",
            NodeRole::Worker => "worker",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node entry of the cluster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub role: NodeRole,

    /// Images to load into this node once it is running
    #[serde(default)]
    pub load_images: Vec<String>,
}

/// Container runtime used to reach the nodes and export host images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// docker-compatible CLI binary (docker, podman, nerdctl)
    pub binary: String,

    /// containerd namespace images are imported into inside the node
    pub namespace: String,

    /// containerd snapshotter used for imports
    pub snapshotter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            namespace: "k8s.io".to_string(),
            snapshotter: "overlayfs".to_string(),
        }
    }
}

/// Cluster load configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Cluster name
    #[serde(default = "default_cluster_name")]
    pub name: String,

    #[serde(default)]
    pub nodes: Vec<NodeConfig>,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

fn default_cluster_name() -> String {
    DEFAULT_CLUSTER_NAME.to_string()
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
            nodes: Vec::new(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl LoadConfig {
    /// Parse and validate a config from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: LoadConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoadError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), nodes = config.nodes.len(), "Loaded cluster config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoadError::ConfigError(
                "cluster name must not be empty".to_string(),
            ));
        }
        if self.runtime.binary.trim().is_empty() {
            return Err(LoadError::ConfigError(
                "runtime binary must not be empty".to_string(),
            ));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.load_images.iter().any(|image| image.trim().is_empty()) {
                return Err(LoadError::ConfigError(format!(
                    "nodes[{}] ({}) lists an empty image name",
                    i, node.role
                )));
            }
        }
        Ok(())
    }

    /// Images configured per node, keyed by the node's container name.
    pub fn images_by_node(&self) -> HashMap<String, Vec<String>> {
        let mut namer = NodeNamer::new(&self.name);
        self.nodes
            .iter()
            .map(|node| (namer.next_name(node.role), node.load_images.clone()))
            .collect()
    }
}

/// Produces node container names in cluster creation order.
///
/// The first node of a role is `<cluster>-<role>`, later ones get a counter
/// suffix starting at 2 (`kind-worker`, `kind-worker2`, `kind-worker3`).
#[derive(Debug)]
pub struct NodeNamer {
    cluster: String,
    counter: HashMap<NodeRole, usize>,
}

impl NodeNamer {
    pub fn new(cluster: &str) -> Self {
        Self {
            cluster: cluster.to_string(),
            counter: HashMap::new(),
        }
    }

    pub fn next_name(&mut self, role: NodeRole) -> String {
        let count = self.counter.entry(role).or_insert(0);
        *count += 1;
        if *count == 1 {
            format!("{}-{}", self.cluster, role)
        } else {
            format!("{}-{}{}", self.cluster, role, count)
        }
    }
}

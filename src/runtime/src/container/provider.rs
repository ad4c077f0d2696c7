//! ContainerNodeProvider - nodes running as containers on the host runtime.

use std::fs::File;

use async_trait::async_trait;
use nodeload_core::config::RuntimeConfig;
use nodeload_core::error::{LoadError, Result};
use serde::Deserialize;

use super::command::RuntimeCommand;
use crate::image::ImageTags;
use crate::node::{Node, NodeProvider};

/// Label carrying the cluster name on every node container.
pub const CLUSTER_LABEL: &str = "io.x-k8s.kind.cluster";

/// Node provider backed by a docker-compatible CLI.
///
/// Images inside a node are managed through the node's containerd
/// (`ctr`) and CRI (`crictl`) tooling via `exec`.
#[derive(Debug, Clone)]
pub struct ContainerNodeProvider {
    config: RuntimeConfig,
}

impl ContainerNodeProvider {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> RuntimeCommand {
        RuntimeCommand::new(&self.config.binary)
    }

    fn namespace_flag(&self) -> String {
        format!("--namespace={}", self.config.namespace)
    }
}

#[async_trait]
impl NodeProvider for ContainerNodeProvider {
    async fn list_nodes(&self, cluster: &str) -> Result<Vec<Node>> {
        let out = self
            .command()
            .args(["ps", "-a", "--filter"])
            .arg(format!("label={}={}", CLUSTER_LABEL, cluster))
            .args(["--format", "{{.Names}}"])
            .output()
            .await?;
        Ok(parse_node_names(&out))
    }

    async fn fetch_image_tags(&self, node: &Node, image_id: &str) -> Result<ImageTags> {
        let out = self
            .command()
            .args(["exec", node.name(), "crictl", "inspecti", "-o", "json", image_id])
            .output()
            .await?;
        parse_repo_tags(image_id, &out)
    }

    async fn load_archive(&self, node: &Node, archive: File) -> Result<()> {
        let snapshotter = format!("--snapshotter={}", self.config.snapshotter);
        self.command()
            .args(["exec", "--privileged", "-i", node.name(), "ctr"])
            .arg(self.namespace_flag())
            .args(["images", "import", "--all-platforms", "--digests"])
            .arg(snapshotter)
            .arg("-")
            .output_with_stdin(archive)
            .await
            .map_err(|e| LoadError::ArchiveTransferFailed {
                node: node.name().to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(node = %node, "Imported image archive");
        Ok(())
    }

    async fn tag_image(&self, node: &Node, source: &str, target: &str) -> Result<()> {
        self.command()
            .args(["exec", node.name(), "ctr"])
            .arg(self.namespace_flag())
            .args(["images", "tag", "--force", source, target])
            .output()
            .await?;
        tracing::debug!(node = %node, source, target, "Tagged image");
        Ok(())
    }
}

/// One node name per non-empty output line.
fn parse_node_names(output: &str) -> Vec<Node> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Node::new)
        .collect()
}

#[derive(Deserialize)]
struct InspectImage {
    status: InspectStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectStatus {
    #[serde(default)]
    repo_tags: Vec<String>,
}

/// Parse `crictl inspecti -o json` output into the tag map for `image_id`.
fn parse_repo_tags(image_id: &str, output: &str) -> Result<ImageTags> {
    let inspect: InspectImage = serde_json::from_str(output)?;
    let mut tags = ImageTags::new();
    if !inspect.status.repo_tags.is_empty() {
        tags.insert(
            image_id.to_string(),
            inspect.status.repo_tags.into_iter().collect(),
        );
    }
    Ok(tags)
}

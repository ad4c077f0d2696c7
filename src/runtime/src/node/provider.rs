//! NodeProvider - Trait for cluster node backends.

use std::fs::File;

use async_trait::async_trait;
use nodeload_core::error::Result;

use super::Node;
use crate::image::ImageTags;

/// Access to a cluster's nodes and the image store inside each node.
#[async_trait]
pub trait NodeProvider: Send + Sync {
    /// List the nodes belonging to `cluster`.
    async fn list_nodes(&self, cluster: &str) -> Result<Vec<Node>>;

    /// Tags bound to `image_id` inside the node.
    async fn fetch_image_tags(&self, node: &Node, image_id: &str) -> Result<ImageTags>;

    /// Stream a tar image archive into the node's image store.
    ///
    /// Takes ownership of the handle; it is closed when the call returns.
    async fn load_archive(&self, node: &Node, archive: File) -> Result<()>;

    /// Bind `target` to the image currently tagged `source` inside the node.
    async fn tag_image(&self, node: &Node, source: &str, target: &str) -> Result<()>;
}

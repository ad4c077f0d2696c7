//! Per-node load task planning.

use std::collections::HashMap;

use super::dedupe::dedupe;
use crate::node::Node;

/// One node's worth of image loading work.
///
/// The image list is non-empty and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTask {
    node: Node,
    images: Vec<String>,
}

impl LoadTask {
    /// Build a task, or `None` when nothing remains to load after dedupe.
    pub fn new<S: AsRef<str>>(node: Node, images: &[S]) -> Option<Self> {
        let images = dedupe(images);
        if images.is_empty() {
            return None;
        }
        Some(Self { node, images })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn into_parts(self) -> (Node, Vec<String>) {
        (self.node, self.images)
    }
}

/// Plan one task per target node that has images configured.
///
/// Nodes without an entry, or with an empty list, are skipped.
pub fn plan_tasks(
    targets: &[Node],
    images_by_node: &HashMap<String, Vec<String>>,
) -> Vec<LoadTask> {
    targets
        .iter()
        .filter_map(|node| {
            let images = images_by_node.get(node.name())?;
            let task = LoadTask::new(node.clone(), images.as_slice());
            if task.is_none() {
                tracing::debug!(node = %node, "No images configured for node, skipping");
            }
            task
        })
        .collect()
}

/// Plan the same image list for every target node.
pub fn plan_uniform<S: AsRef<str>>(targets: &[Node], images: &[S]) -> Vec<LoadTask> {
    targets
        .iter()
        .filter_map(|node| LoadTask::new(node.clone(), images))
        .collect()
}

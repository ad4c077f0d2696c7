//! Loading host images into cluster nodes.
//!
//! A load resolves the target nodes, plans one task per node, and runs the
//! tasks concurrently:
//!
//! ```text
//!  list_nodes ──► resolve ──► plan (dedupe per node) ──► run_until_first_error
//!                                                          │
//!                         ┌────────────────────────────────┼──────────────┐
//!                         ▼                                ▼              ▼
//!                      node A                           node B         node C
//!              per image: check_retag              (same, independent)
//!                present ─► skip
//!                retag   ─► tag_image
//!                absent  ─► save to <tmp>/<node>.tar ─► load_archive
//! ```

pub mod dedupe;
pub mod dispatch;
pub mod runner;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nodeload_core::error::{LoadError, Result};

pub use dedupe::dedupe;
pub use dispatch::{plan_tasks, plan_uniform, LoadTask};
pub use runner::run_until_first_error;

use crate::image::{check_retag, ImageSource, RetagDecision};
use crate::node::{resolve, Node, NodeProvider};

/// Loads host images and image archives into the nodes of a cluster.
#[derive(Clone)]
pub struct ImageLoader {
    provider: Arc<dyn NodeProvider>,
    source: Arc<dyn ImageSource>,
}

impl ImageLoader {
    pub fn new(provider: Arc<dyn NodeProvider>, source: Arc<dyn ImageSource>) -> Self {
        Self { provider, source }
    }

    /// Nodes of `cluster` selected by `requested` (all nodes if `None` or empty).
    pub async fn target_nodes(
        &self,
        cluster: &str,
        requested: Option<&[String]>,
    ) -> Result<Vec<Node>> {
        let all_nodes = self.provider.list_nodes(cluster).await?;
        tracing::debug!(cluster, nodes = all_nodes.len(), "Listed cluster nodes");
        resolve(cluster, all_nodes, requested)
    }

    /// Load the images configured for each node, keyed by node name.
    ///
    /// Target nodes without configured images are skipped. All node tasks
    /// run to completion; the first failure by start order is returned.
    pub async fn load_images_into_nodes(
        &self,
        cluster: &str,
        images_by_node: &HashMap<String, Vec<String>>,
        target_node_names: Option<&[String]>,
    ) -> Result<()> {
        for images in images_by_node.values() {
            validate_names(images)?;
        }
        let targets = self.target_nodes(cluster, target_node_names).await?;
        let tasks = plan_tasks(&targets, images_by_node);
        self.run_image_tasks(tasks).await
    }

    /// Load the same images into every target node.
    pub async fn load_images(
        &self,
        cluster: &str,
        images: &[String],
        target_node_names: Option<&[String]>,
    ) -> Result<()> {
        if images.is_empty() {
            return Err(LoadError::InvalidArgument(
                "a list of image names is required".to_string(),
            ));
        }
        validate_names(images)?;
        let targets = self.target_nodes(cluster, target_node_names).await?;
        let tasks = plan_uniform(&targets, images);
        self.run_image_tasks(tasks).await
    }

    /// Import existing tar archives from the host into every target node.
    ///
    /// Each node task opens its own handle on every archive.
    pub async fn load_archives(
        &self,
        cluster: &str,
        archives: &[String],
        target_node_names: Option<&[String]>,
    ) -> Result<()> {
        if archives.is_empty() {
            return Err(LoadError::InvalidArgument(
                "a list of image archives is required".to_string(),
            ));
        }
        validate_names(archives)?;
        let targets = self.target_nodes(cluster, target_node_names).await?;

        let tasks = plan_uniform(&targets, archives)
            .into_iter()
            .map(|task| {
                let provider = Arc::clone(&self.provider);
                let (node, archives) = task.into_parts();
                let label = node.name().to_string();
                let fut = async move {
                    for archive in &archives {
                        load_archive_file(&*provider, &node, Path::new(archive)).await?;
                    }
                    tracing::info!(node = %node, archives = archives.len(), "Loaded image archives");
                    Ok::<_, LoadError>(())
                };
                (label, fut)
            })
            .collect();

        run_until_first_error(tasks).await
    }

    async fn run_image_tasks(&self, tasks: Vec<LoadTask>) -> Result<()> {
        if tasks.is_empty() {
            tracing::info!("No images to load");
            return Ok(());
        }

        // Host IDs are resolved once, before any node is touched, so a
        // missing image fails the whole load up front.
        let mut image_ids = HashMap::new();
        let mut seen = HashSet::new();
        for image in tasks.iter().flat_map(|task| task.images()) {
            if seen.insert(image.as_str()) {
                let id = self.source.image_id(image).await?;
                tracing::debug!(image = %image, id = %id, "Resolved host image");
                image_ids.insert(image.clone(), id);
            }
        }
        let image_ids = Arc::new(image_ids);

        let workdir = tempfile::Builder::new().prefix("nodeload-").tempdir()?;

        let futures = tasks
            .into_iter()
            .map(|task| {
                let provider = Arc::clone(&self.provider);
                let source = Arc::clone(&self.source);
                let image_ids = Arc::clone(&image_ids);
                let (node, images) = task.into_parts();
                let archive = workdir.path().join(format!("{}.tar", node.name()));
                let label = node.name().to_string();
                let fut = async move {
                    load_node_images(
                        &*provider,
                        &*source,
                        &node,
                        &images,
                        &image_ids,
                        &archive,
                    )
                    .await
                };
                (label, fut)
            })
            .collect();

        // workdir lives until every task has finished
        let result = run_until_first_error(futures).await;
        drop(workdir);
        result
    }
}

/// Bring one node up to date with `images`.
///
/// Images the node already holds under the requested name are skipped, images
/// held under another name are retagged in place, and the rest are exported
/// into a single archive and imported.
async fn load_node_images(
    provider: &dyn NodeProvider,
    source: &dyn ImageSource,
    node: &Node,
    images: &[String],
    image_ids: &HashMap<String, String>,
    archive: &Path,
) -> Result<()> {
    let mut missing = Vec::new();

    for image in images {
        let image_id = image_ids
            .get(image)
            .ok_or_else(|| LoadError::ImageNotFound(image.clone()))?;

        match check_retag(provider, node, image_id, image).await {
            RetagDecision::Present(canonical) => {
                tracing::info!(node = %node, image = %canonical, "Image already present on node");
            }
            RetagDecision::RetagRequired(canonical) => {
                tracing::info!(node = %node, image = %canonical, "Image present under another name, retagging");
                provider.tag_image(node, image_id, canonical.as_str()).await?;
            }
            RetagDecision::Absent => missing.push(image.clone()),
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    tracing::info!(node = %node, images = ?missing, "Loading images into node");
    source.save(&missing, archive).await?;
    load_archive_file(provider, node, archive).await
}

/// Open `path` read-only and stream it into the node.
///
/// Open failures are reported as `ArchiveOpenFailed`, anything after that as
/// `ArchiveTransferFailed`. The handle is released before this returns.
pub async fn load_archive_file(
    provider: &dyn NodeProvider,
    node: &Node,
    path: &Path,
) -> Result<()> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| LoadError::ArchiveOpenFailed {
            node: node.name().to_string(),
            path: PathBuf::from(path),
            source,
        })?
        .into_std()
        .await;

    provider
        .load_archive(node, file)
        .await
        .map_err(|e| match e {
            LoadError::ArchiveTransferFailed { .. } => e,
            other => LoadError::ArchiveTransferFailed {
                node: node.name().to_string(),
                message: other.to_string(),
            },
        })
}

fn validate_names(names: &[String]) -> Result<()> {
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(LoadError::InvalidArgument(
            "image names must not be empty".to_string(),
        ));
    }
    Ok(())
}

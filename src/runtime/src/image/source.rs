//! ImageSource - Trait for the host-side image store.

use std::path::Path;

use async_trait::async_trait;
use nodeload_core::error::Result;

/// Host image store the images are exported from.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Content ID of a locally present image.
    ///
    /// Fails with `ImageNotFound` when the host does not have the image.
    async fn image_id(&self, name: &str) -> Result<String>;

    /// Write the named images into a single tar archive at `destination`.
    async fn save(&self, names: &[String], destination: &Path) -> Result<()>;
}

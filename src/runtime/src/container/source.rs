//! ContainerImageSource - the host runtime's local image store.

use std::path::Path;

use async_trait::async_trait;
use nodeload_core::config::RuntimeConfig;
use nodeload_core::error::{LoadError, Result};

use super::command::RuntimeCommand;
use crate::image::ImageSource;

/// Host image store reached through a docker-compatible CLI.
#[derive(Debug, Clone)]
pub struct ContainerImageSource {
    binary: String,
}

impl ContainerImageSource {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            binary: config.binary.clone(),
        }
    }
}

#[async_trait]
impl ImageSource for ContainerImageSource {
    async fn image_id(&self, name: &str) -> Result<String> {
        let out = RuntimeCommand::new(&self.binary)
            .args(["image", "inspect", "-f", "{{ .Id }}", name])
            .output()
            .await
            .map_err(|e| {
                tracing::debug!(image = name, error = %e, "Host image inspect failed");
                LoadError::ImageNotFound(name.to_string())
            })?;

        let id = out.trim();
        if id.is_empty() {
            return Err(LoadError::ImageNotFound(name.to_string()));
        }
        Ok(id.to_string())
    }

    async fn save(&self, names: &[String], destination: &Path) -> Result<()> {
        RuntimeCommand::new(&self.binary)
            .args(["save", "-o"])
            .arg(destination.to_string_lossy())
            .args(names.iter().cloned())
            .output()
            .await?;
        tracing::debug!(images = ?names, path = %destination.display(), "Saved image archive");
        Ok(())
    }
}

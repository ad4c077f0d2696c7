//! CLI command definitions and dispatch.

mod config;
mod docker_image;
mod image_archive;
mod version;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use nodeload_core::config::{RuntimeConfig, DEFAULT_CLUSTER_NAME};
use nodeload_runtime::{ContainerImageSource, ContainerNodeProvider, ImageLoader};

/// nodeload: load host container images into cluster nodes.
#[derive(Parser)]
#[command(name = "nodeload", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Load images from the host runtime into all or specified nodes
    DockerImage(docker_image::DockerImageArgs),
    /// Load image archives (tar) into all or specified nodes
    ImageArchive(image_archive::ImageArchiveArgs),
    /// Load the per-node images listed in a cluster config file
    Config(config::ConfigArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// Cluster and node selection shared by the load commands.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// The cluster context name
    #[arg(short = 'n', long, env = "KIND_CLUSTER_NAME", default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,

    /// Comma separated list of nodes to load images into
    #[arg(long, value_delimiter = ',')]
    pub nodes: Vec<String>,

    /// docker-compatible runtime binary used to reach the nodes
    #[arg(long, env = "NODELOAD_RUNTIME", default_value = "docker")]
    pub runtime: String,
}

impl TargetArgs {
    /// Requested node names, `None` when all nodes are targeted.
    pub fn node_filter(&self) -> Option<&[String]> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.nodes.as_slice())
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            binary: self.runtime.clone(),
            ..RuntimeConfig::default()
        }
    }
}

/// Build a loader over the container runtime backend.
pub(crate) fn open_loader(runtime: &RuntimeConfig) -> ImageLoader {
    ImageLoader::new(
        Arc::new(ContainerNodeProvider::new(runtime.clone())),
        Arc::new(ContainerImageSource::new(runtime)),
    )
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::DockerImage(args) => docker_image::execute(args).await,
        Command::ImageArchive(args) => image_archive::execute(args).await,
        Command::Config(args) => config::execute(args).await,
        Command::Version(args) => version::execute(args).await,
    }
}

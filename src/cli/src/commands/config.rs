//! `nodeload config` command: load the images a cluster file assigns to each node.

use std::path::PathBuf;

use clap::Args;
use nodeload_core::LoadConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Cluster config file (YAML)
    pub file: PathBuf,

    /// Override the cluster name from the file
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Comma separated list of nodes to load images into
    #[arg(long, value_delimiter = ',')]
    pub nodes: Vec<String>,
}

pub async fn execute(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = LoadConfig::from_file(&args.file)?;
    if let Some(name) = args.name {
        config.name = name;
        config.validate()?;
    }

    // node names are derived from the (possibly overridden) cluster name
    let images_by_node = config.images_by_node();
    tracing::debug!(cluster = %config.name, nodes = images_by_node.len(), "Resolved configured node images");
    let node_filter = if args.nodes.is_empty() {
        None
    } else {
        Some(args.nodes.as_slice())
    };

    let loader = super::open_loader(&config.runtime);
    loader
        .load_images_into_nodes(&config.name, &images_by_node, node_filter)
        .await?;

    println!("Loaded configured images into cluster {:?}", config.name);
    Ok(())
}

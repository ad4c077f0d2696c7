//! `nodeload image-archive` command: load tar archives into nodes.

use clap::Args;

use super::TargetArgs;

#[derive(Args)]
pub struct ImageArchiveArgs {
    /// Paths of image archives produced by `docker save`
    #[arg(required = true)]
    pub archives: Vec<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn execute(args: ImageArchiveArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Fail on a bad path before contacting the cluster
    for archive in &args.archives {
        let meta = std::fs::metadata(archive)
            .map_err(|e| format!("Failed to open {}: {e}", archive))?;
        if !meta.is_file() {
            return Err(format!("{} is not a file", archive).into());
        }
    }

    let loader = super::open_loader(&args.target.runtime_config());
    loader
        .load_archives(&args.target.name, &args.archives, args.target.node_filter())
        .await?;

    println!(
        "Loaded {} archive(s) into cluster {:?}",
        args.archives.len(),
        args.target.name
    );
    Ok(())
}

//! `nodeload docker-image` command: load host images into nodes.

use clap::Args;

use super::TargetArgs;

#[derive(Args)]
pub struct DockerImageArgs {
    /// Image names (e.g., "nginx", "my-app:dev")
    #[arg(required = true)]
    pub images: Vec<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn execute(args: DockerImageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let loader = super::open_loader(&args.target.runtime_config());

    loader
        .load_images(&args.target.name, &args.images, args.target.node_filter())
        .await?;

    println!(
        "Loaded {} image(s) into cluster {:?}",
        args.images.len(),
        args.target.name
    );
    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bpa_core::fabric::auth::{self, SpnCredentials};
use bpa_core::fabric::client::FabricClient;
use bpa_core::fabric::deploy;

#[derive(Debug, Parser)]
#[command(
    name = "fabric-deploy",
    version,
    about = "Publishes PBIP item folders to a Fabric workspace"
)]
struct Args {
    /// Display name of the target workspace, created when absent
    #[arg(long, default_value = "DevWorkspace")]
    workspace: String,

    /// PBIP item folders to publish, in order
    #[arg(required = true)]
    items: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let credentials = SpnCredentials::from_env()?;
    let token = auth::fetch_token(&credentials.token_url(), &credentials)?;
    let client = FabricClient::new(token);

    let workspace_id = deploy::ensure_workspace(&client, &args.workspace)?;
    for item in &args.items {
        deploy::publish_item(&client, &workspace_id, item)?;
    }

    tracing::info!(
        workspace = %args.workspace,
        items = args.items.len(),
        "deployment complete"
    );
    Ok(())
}

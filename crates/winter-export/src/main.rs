use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use winter_export::{ExportOptions, export_site};
use winter_server::config::ServerConfig;

#[derive(Parser)]
#[command(name = "winter-export")]
#[command(about = "Render the arcade page into a static site")]
#[command(version)]
struct Cli {
    /// Output directory
    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,

    /// Server config file
    #[arg(long, default_value = "winter.toml")]
    config: PathBuf,

    /// Write only index.html, skip the web root's assets
    #[arg(long)]
    html_only: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(&cli.config);
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let options = ExportOptions {
        out_dir: cli.out_dir,
        copy_assets: !cli.html_only,
    };
    match export_site(config, &options).await {
        Ok(report) => {
            tracing::info!(
                "Build complete! Static site in {}",
                options.out_dir.display()
            );
            tracing::debug!(?report);
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Export failed: {e}");
            ExitCode::FAILURE
        },
    }
}

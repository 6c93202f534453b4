use std::path::PathBuf;

use clap::Parser;
use homework_bot::{
    app_init::{AppComponents, initialize_app},
    config::default_config_path,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "homework-bot",
    version,
    about = "Relays homework review status changes to Telegram"
)]
struct Cli {
    /// Settings file, created with defaults when missing
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Force debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let AppComponents { poller, _log_guard } = initialize_app(config_path, cli.debug)?;

    let shutdown = poller.shutdown_sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C");
            let _ = shutdown.send(());
        }
    });

    poller.run().await;

    Ok(())
}

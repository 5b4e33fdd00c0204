//! sproutctl - greenhouse telemetry dashboard and relay control.

use anyhow::Result;
use clap::Parser;
use sprout_common::config::Config;
use sproutctl::api_client::ApiClient;
use sproutctl::cli::{Cli, Command};
use sproutctl::{commands, logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dashboard_mode = matches!(cli.command, None | Some(Command::Dashboard));
    logging::init(dashboard_mode)?;

    let mut config = Config::load();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let client = ApiClient::new(&config.base_url)?;

    match cli.command {
        None | Some(Command::Dashboard) => tui::run(client).await,
        Some(Command::Status) => commands::status(&client).await,
        Some(Command::Relay { action }) => commands::relay(&client, action.into()).await,
    }
}

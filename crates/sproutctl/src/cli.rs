//! Command-line surface.

use clap::{Parser, Subcommand, ValueEnum};
use sprout_common::api::RelayStatus;

#[derive(Debug, Parser)]
#[command(name = "sproutctl")]
#[command(about = "Greenhouse telemetry dashboard and relay control", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides SPROUT_API_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive dashboard (the default)
    Dashboard,

    /// Fetch the current readings once and print them
    Status,

    /// Turn the relay on or off
    Relay {
        #[arg(value_enum)]
        action: RelayAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelayAction {
    On,
    Off,
}

impl From<RelayAction> for RelayStatus {
    fn from(action: RelayAction) -> Self {
        match action {
            RelayAction::On => RelayStatus::On,
            RelayAction::Off => RelayStatus::Off,
        }
    }
}

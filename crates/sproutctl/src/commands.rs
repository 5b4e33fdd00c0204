//! One-shot command handlers: `status` and `relay on|off`.

use crate::api_client::{ApiClient, TelemetryApi};
use crate::poller;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sprout_common::api::RelayStatus;

/// Fetch one combined reading (with the poll loop's retry policy) and print.
pub async fn status(client: &ApiClient) -> Result<()> {
    let snapshot = poller::poll_once_with_retry(client)
        .await
        .context("Failed to fetch data from the server")?;

    let kw = 15; // key width

    println!();
    println!("{}", format!("sproutctl v{}", env!("CARGO_PKG_VERSION")).bold());
    println!("{}", "─".repeat(40).dimmed());
    print_kv("backend", client.api_base(), kw);
    print_kv("humidity", &format!("{:.1} %", snapshot.humidity), kw);
    print_kv("soil moisture", &format!("{:.1} %", snapshot.soil_moisture), kw);
    print_kv("temperature", &format!("{:.1} \u{b0}", snapshot.temperature), kw);

    match snapshot.relay {
        RelayStatus::On => println!("{:kw$} {}", "relay", "ON".green().bold()),
        RelayStatus::Off => println!("{:kw$} {}", "relay", "OFF".dimmed()),
    }
    println!();

    Ok(())
}

/// Drive the relay to `target`. No retry; a failure leaves backend state as
/// it was and exits non-zero.
pub async fn relay(client: &ApiClient, target: RelayStatus) -> Result<()> {
    client
        .set_relay(target)
        .await
        .context("Failed to update relay status")?;

    println!("{} Relay turned {}", "ok:".green().bold(), target.bold());
    Ok(())
}

fn print_kv(key: &str, value: &str, width: usize) {
    println!("{key:width$} {value}");
}

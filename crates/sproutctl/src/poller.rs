//! Poll loop - fetches the four readings on a fixed cadence.
//!
//! One cycle issues the four reads concurrently and succeeds only when all
//! four succeed. A failed cycle is retried a bounded number of times with a
//! fixed delay; exhausting the retries reports a single failure for that
//! cycle and the interval keeps ticking, so a later cycle can recover.
//!
//! The loop owns no UI state. It reports through an mpsc channel and exits
//! when the receiving side is gone, which also makes late responses after a
//! teardown harmless: the send fails and the result is dropped.

use crate::api_client::TelemetryApi;
use anyhow::Result;
use sprout_common::api::RelayStatus;
use sprout_common::config::{MAX_RETRIES, POLL_INTERVAL, RETRY_DELAY};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// One successful poll cycle's worth of readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub humidity: f64,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub relay: RelayStatus,
}

/// Messages from background tasks to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// A poll cycle completed; readings follow.
    Snapshot(TelemetrySnapshot),
    /// A poll cycle failed after all retries.
    PollFailed,
    /// A relay write finished.
    RelayOutcome { requested: RelayStatus, ok: bool },
}

/// Run the poll loop until the receiver is dropped.
///
/// The first cycle fires immediately; ticks are strictly sequential, so a
/// new cycle never starts while a prior cycle is still retrying and history
/// append order matches poll order.
pub async fn run<A: TelemetryApi>(api: A, tx: mpsc::Sender<TuiMessage>) {
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let message = match poll_once_with_retry(&api).await {
            Ok(snapshot) => TuiMessage::Snapshot(snapshot),
            Err(error) => {
                warn!(%error, "poll cycle failed after {} retries", MAX_RETRIES);
                TuiMessage::PollFailed
            }
        };

        if tx.send(message).await.is_err() {
            debug!("event loop gone, stopping poller");
            break;
        }
    }
}

/// One combined fetch with the bounded retry policy applied.
pub async fn poll_once_with_retry<A: TelemetryApi>(api: &A) -> Result<TelemetrySnapshot> {
    let mut attempt = 0;
    loop {
        match poll_cycle(api).await {
            Ok(snapshot) => {
                if attempt > 0 {
                    info!(attempt = attempt + 1, "poll recovered after retry");
                }
                return Ok(snapshot);
            }
            Err(error) if attempt < MAX_RETRIES => {
                attempt += 1;
                debug!(%error, attempt, "poll cycle failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(error) => return Err(error),
        }
    }
}

/// The four concurrent reads. Fails as soon as any endpoint fails.
async fn poll_cycle<A: TelemetryApi>(api: &A) -> Result<TelemetrySnapshot> {
    let (humidity, relay, soil_moisture, temperature) = tokio::try_join!(
        api.humidity(),
        api.relay_status(),
        api.soil_moisture(),
        api.temperature(),
    )?;

    Ok(TelemetrySnapshot {
        humidity: humidity.humidity,
        soil_moisture: soil_moisture.soil_moisture,
        temperature: temperature.temperature,
        relay: relay.status,
    })
}

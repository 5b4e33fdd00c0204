//! Relay command - drives the watering relay on/off.
//!
//! The client is deliberately optimistic: a 2xx from the write endpoint
//! flips the local status without a re-fetch, and the next poll cycle
//! re-synchronizes from `/relay-status`. A failed write changes nothing and
//! is not retried.

use crate::api_client::TelemetryApi;
use crate::poller::TuiMessage;
use sprout_common::api::RelayStatus;
use tracing::{info, warn};

/// Invoke the write endpoint for `requested` and report the outcome.
///
/// Mutual exclusivity ("don't turn on what is already on") is enforced by
/// the view disabling the control, not here.
pub async fn execute<A: TelemetryApi>(api: &A, requested: RelayStatus) -> TuiMessage {
    match api.set_relay(requested).await {
        Ok(()) => {
            info!(status = %requested, "relay command succeeded");
            TuiMessage::RelayOutcome {
                requested,
                ok: true,
            }
        }
        Err(error) => {
            warn!(%error, status = %requested, "relay command failed");
            TuiMessage::RelayOutcome {
                requested,
                ok: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::tests::FakeApi;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn success_reports_requested_state() {
        let api = FakeApi::default();
        let message = execute(&api, RelayStatus::On).await;

        assert_eq!(
            message,
            TuiMessage::RelayOutcome {
                requested: RelayStatus::On,
                ok: true,
            }
        );
        assert_eq!(*api.last_relay.lock().unwrap(), Some(RelayStatus::On));
    }

    #[tokio::test]
    async fn failure_reports_not_ok_and_writes_nothing() {
        let api = FakeApi::default();
        api.relay_should_fail.store(true, Ordering::SeqCst);

        let message = execute(&api, RelayStatus::Off).await;
        assert_eq!(
            message,
            TuiMessage::RelayOutcome {
                requested: RelayStatus::Off,
                ok: false,
            }
        );
        assert_eq!(*api.last_relay.lock().unwrap(), None);
    }
}

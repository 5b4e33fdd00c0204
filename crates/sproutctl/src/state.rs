//! Dashboard state - central view model for the TUI.
//!
//! Everything rendered on screen comes from this struct. It is owned by the
//! event loop task and mutated only there, by applying messages from the
//! poller and relay tasks.

use crate::poller::{TelemetrySnapshot, TuiMessage};
use sprout_common::api::RelayStatus;
use sprout_common::config::NOTIFICATION_DURATION;
use sprout_common::history::HistoryBuffer;
use std::time::Instant;

/// Message shown when the initial load cannot reach the backend.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch data from the server.";

/// Message shown when a relay write fails.
pub const RELAY_ERROR_MESSAGE: &str = "Failed to update relay status.";

/// Transient feedback severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient feedback banner. At most one is visible; a new one replaces it.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Notification {
    fn new(message: String, severity: Severity) -> Self {
        Self {
            message,
            severity,
            shown_at: Instant::now(),
        }
    }

    /// Auto-dismissal deadline check, driven from the event loop.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTIFICATION_DURATION
    }
}

/// Central TUI state.
#[derive(Debug)]
pub struct DashboardState {
    /// Point-in-time readings, overwritten each poll cycle.
    pub humidity: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,

    /// Rolling chart series, one per reading kind.
    pub humidity_history: HistoryBuffer,
    pub soil_moisture_history: HistoryBuffer,
    pub temperature_history: HistoryBuffer,

    /// Relay state; None until the first poll or relay command resolves.
    pub relay_status: Option<RelayStatus>,

    /// True until the first successful cycle (or a fatal initial failure).
    pub loading: bool,

    /// Set when retries exhaust before any data has loaded. Cleared by the
    /// next successful cycle.
    pub fatal_error: Option<String>,

    pub notification: Option<Notification>,

    pub dark_mode: bool,
    pub show_help: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            humidity: None,
            soil_moisture: None,
            temperature: None,
            humidity_history: HistoryBuffer::new(),
            soil_moisture_history: HistoryBuffer::new(),
            temperature_history: HistoryBuffer::new(),
            relay_status: None,
            loading: true,
            fatal_error: None,
            notification: None,
            dark_mode: false,
            show_help: false,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one cycle has delivered data.
    pub fn has_data(&self) -> bool {
        !self.humidity_history.is_empty()
    }

    /// The "Turn On" control is disabled while the relay is already ON.
    /// Unknown status leaves both controls enabled, as the original UI did.
    pub fn can_turn_on(&self) -> bool {
        self.relay_status != Some(RelayStatus::On)
    }

    pub fn can_turn_off(&self) -> bool {
        self.relay_status != Some(RelayStatus::Off)
    }

    /// Apply one message from a background task.
    pub fn apply(&mut self, message: TuiMessage) {
        match message {
            TuiMessage::Snapshot(snapshot) => self.apply_snapshot(snapshot),
            TuiMessage::PollFailed => self.apply_poll_failure(),
            TuiMessage::RelayOutcome { requested, ok } => self.apply_relay_outcome(requested, ok),
        }
    }

    fn apply_snapshot(&mut self, snapshot: TelemetrySnapshot) {
        self.humidity = Some(snapshot.humidity);
        self.soil_moisture = Some(snapshot.soil_moisture);
        self.temperature = Some(snapshot.temperature);

        self.humidity_history.push(snapshot.humidity);
        self.soil_moisture_history.push(snapshot.soil_moisture);
        self.temperature_history.push(snapshot.temperature);

        // The poll re-synchronizes relay status from the backend each cycle.
        self.relay_status = Some(snapshot.relay);

        self.loading = false;
        self.fatal_error = None;
    }

    fn apply_poll_failure(&mut self) {
        if self.has_data() {
            // Data is already on screen; keep rendering it and just tell the
            // user this cycle was lost.
            self.notify(FETCH_ERROR_MESSAGE.to_string(), Severity::Error);
        } else {
            self.loading = false;
            self.fatal_error = Some(FETCH_ERROR_MESSAGE.to_string());
        }
    }

    fn apply_relay_outcome(&mut self, requested: RelayStatus, ok: bool) {
        if ok {
            self.relay_status = Some(requested);
            self.notify(format!("Relay turned {requested}"), Severity::Success);
        } else {
            self.notify(RELAY_ERROR_MESSAGE.to_string(), Severity::Error);
        }
    }

    pub fn notify(&mut self, message: String, severity: Severity) {
        self.notification = Some(Notification::new(message, severity));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Clear the notification once its display duration has elapsed.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot(humidity: f64) -> TelemetrySnapshot {
        TelemetrySnapshot {
            humidity,
            soil_moisture: 40.0,
            temperature: 22.0,
            relay: RelayStatus::Off,
        }
    }

    #[test]
    fn starts_loading_with_no_data() {
        let state = DashboardState::new();
        assert!(state.loading);
        assert!(!state.has_data());
        assert!(state.fatal_error.is_none());
    }

    #[test]
    fn snapshot_fills_values_and_histories() {
        let mut state = DashboardState::new();
        state.apply(TuiMessage::Snapshot(snapshot(55.0)));

        assert!(!state.loading);
        assert_eq!(state.humidity, Some(55.0));
        assert_eq!(state.soil_moisture, Some(40.0));
        assert_eq!(state.temperature, Some(22.0));
        assert_eq!(state.relay_status, Some(RelayStatus::Off));
        assert_eq!(state.humidity_history.values(), vec![55.0]);
        assert_eq!(state.soil_moisture_history.values(), vec![40.0]);
        assert_eq!(state.temperature_history.values(), vec![22.0]);
    }

    #[test]
    fn initial_poll_failure_is_fatal() {
        let mut state = DashboardState::new();
        state.apply(TuiMessage::PollFailed);

        assert!(!state.loading);
        assert_eq!(state.fatal_error.as_deref(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn later_success_clears_fatal_error() {
        let mut state = DashboardState::new();
        state.apply(TuiMessage::PollFailed);
        state.apply(TuiMessage::Snapshot(snapshot(50.0)));

        assert!(state.fatal_error.is_none());
        assert!(state.has_data());
    }

    #[test]
    fn poll_failure_after_data_keeps_charts_and_notifies() {
        let mut state = DashboardState::new();
        state.apply(TuiMessage::Snapshot(snapshot(50.0)));
        state.apply(TuiMessage::PollFailed);

        assert!(state.fatal_error.is_none());
        assert_eq!(state.humidity_history.len(), 1);
        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, FETCH_ERROR_MESSAGE);
    }

    #[test]
    fn relay_success_flips_status_and_names_state() {
        let mut state = DashboardState::new();
        state.apply(TuiMessage::RelayOutcome {
            requested: RelayStatus::On,
            ok: true,
        });

        assert_eq!(state.relay_status, Some(RelayStatus::On));
        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.severity, Severity::Success);
        assert!(notification.message.contains("ON"));
    }

    #[test]
    fn relay_failure_leaves_status_untouched() {
        let mut state = DashboardState::new();
        state.apply(TuiMessage::Snapshot(snapshot(50.0)));
        assert_eq!(state.relay_status, Some(RelayStatus::Off));

        state.apply(TuiMessage::RelayOutcome {
            requested: RelayStatus::On,
            ok: false,
        });

        assert_eq!(state.relay_status, Some(RelayStatus::Off));
        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, RELAY_ERROR_MESSAGE);
    }

    #[test]
    fn controls_are_mutually_exclusive_by_status() {
        let mut state = DashboardState::new();
        // Unknown status: both enabled.
        assert!(state.can_turn_on());
        assert!(state.can_turn_off());

        state.relay_status = Some(RelayStatus::On);
        assert!(!state.can_turn_on());
        assert!(state.can_turn_off());

        state.relay_status = Some(RelayStatus::Off);
        assert!(state.can_turn_on());
        assert!(!state.can_turn_off());
    }

    #[test]
    fn notification_expires_after_duration() {
        let mut state = DashboardState::new();
        state.notify("Relay turned ON".to_string(), Severity::Success);

        let now = Instant::now();
        state.expire_notification(now);
        assert!(state.notification.is_some());

        state.expire_notification(now + NOTIFICATION_DURATION + Duration::from_millis(1));
        assert!(state.notification.is_none());
    }

    #[test]
    fn manual_dismissal_clears_immediately() {
        let mut state = DashboardState::new();
        state.notify("Relay turned OFF".to_string(), Severity::Success);
        state.dismiss_notification();
        assert!(state.notification.is_none());
    }

    #[test]
    fn new_notification_replaces_the_old() {
        let mut state = DashboardState::new();
        state.notify("first".to_string(), Severity::Success);
        state.notify("second".to_string(), Severity::Error);

        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.message, "second");
        assert_eq!(notification.severity, Severity::Error);
    }
}

//! sproutctl - terminal client for the sprout greenhouse backend.
//!
//! Polls the backend for humidity, soil moisture, and temperature, renders
//! rolling charts in a TUI, and drives the watering relay.

pub mod api_client;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod poller;
pub mod relay;
pub mod state;
pub mod tui;

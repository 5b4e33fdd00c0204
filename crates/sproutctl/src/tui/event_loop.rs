//! Event loop - terminal lifecycle, key handling, and message dispatch.

use crate::api_client::ApiClient;
use crate::poller::{self, TuiMessage};
use crate::relay;
use crate::state::DashboardState;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sprout_common::api::RelayStatus;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::info;

use super::render::draw_ui;

/// How long one event-loop iteration waits for a key before redrawing.
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Run the dashboard until the user quits.
pub async fn run(client: ApiClient) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!("Failed to enable raw mode: {e}. Run sproutctl in a real terminal (TTY).")
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {e}")
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = DashboardState::new();

    // The poller lives on its own task and reports over this channel. When
    // the event loop returns, rx is dropped and the poller stops on its next
    // send; in-flight responses die with it instead of touching `state`.
    let (tx, mut rx) = mpsc::channel(32);
    tokio::spawn(poller::run(client.clone(), tx.clone()));

    info!(api = client.api_base(), "dashboard started");

    let result = run_event_loop(&mut terminal, &mut state, client, tx, &mut rx).await;

    let cleanup = restore_terminal(&mut terminal);
    result.and(cleanup)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut DashboardState,
    client: ApiClient,
    tx: mpsc::Sender<TuiMessage>,
    rx: &mut mpsc::Receiver<TuiMessage>,
) -> Result<()> {
    loop {
        // Drain background messages before drawing.
        while let Ok(message) = rx.try_recv() {
            state.apply(message);
        }

        state.expire_notification(Instant::now());

        terminal.draw(|f| draw_ui(f, state))?;

        if event::poll(EVENT_POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Char('q'), _) => break,
                    (KeyCode::Char('o'), _) => {
                        request_relay(state, &client, &tx, RelayStatus::On);
                    }
                    (KeyCode::Char('f'), _) => {
                        request_relay(state, &client, &tx, RelayStatus::Off);
                    }
                    (KeyCode::Char('d'), _) => state.toggle_dark_mode(),
                    (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => state.toggle_help(),
                    (KeyCode::Esc, _) => {
                        if state.show_help {
                            state.show_help = false;
                        } else {
                            state.dismiss_notification();
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Fire a relay write in the background. The control is disabled while the
/// relay is already in the requested state, so the keypress is ignored then.
fn request_relay(
    state: &DashboardState,
    client: &ApiClient,
    tx: &mpsc::Sender<TuiMessage>,
    requested: RelayStatus,
) {
    let enabled = match requested {
        RelayStatus::On => state.can_turn_on(),
        RelayStatus::Off => state.can_turn_off(),
    };
    if !enabled {
        return;
    }

    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = relay::execute(&client, requested).await;
        // Event loop gone means nobody cares about the outcome anymore.
        let _ = tx.send(outcome).await;
    });
}

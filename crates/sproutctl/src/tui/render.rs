//! Rendering - draws the dashboard from `DashboardState`.
//!
//! Chart colors follow the web dashboard this replaces: teal humidity,
//! pink soil moisture, blue temperature bars.

use crate::state::{DashboardState, Notification, Severity};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};
use sprout_common::config::HISTORY_CAPACITY;
use sprout_common::history::HistoryBuffer;

const HUMIDITY_COLOR: Color = Color::Rgb(75, 192, 192);
const SOIL_MOISTURE_COLOR: Color = Color::Rgb(255, 99, 132);
const TEMPERATURE_COLOR: Color = Color::Rgb(54, 162, 235);

/// Palette for the dark/light toggle.
struct Theme {
    bg: Color,
    fg: Color,
    dim: Color,
    border: Color,
}

impl Theme {
    fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Rgb(18, 18, 18),
                fg: Color::Rgb(230, 230, 230),
                dim: Color::Rgb(110, 110, 110),
                border: Color::Rgb(80, 80, 80),
            }
        } else {
            Self {
                bg: Color::Reset,
                fg: Color::Black,
                dim: Color::DarkGray,
                border: Color::Gray,
            }
        }
    }
}

pub fn draw_ui(f: &mut Frame, state: &DashboardState) {
    let theme = Theme::for_mode(state.dark_mode);
    let size = f.size();

    // Paint the backdrop so theme switches cover the whole frame.
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        size,
    );

    if state.loading {
        draw_centered_message(f, size, "Loading data...", theme.fg);
        return;
    }

    if let Some(message) = &state.fatal_error {
        draw_centered_message(f, size, message, Color::Red);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(5),  // relay card
            Constraint::Min(10),    // charts
            Constraint::Length(1),  // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], &theme);
    draw_relay_card(f, chunks[1], state, &theme);
    draw_charts(f, chunks[2], state, &theme);
    draw_status_bar(f, chunks[3], state, &theme);

    if let Some(notification) = &state.notification {
        draw_notification(f, size, notification);
    }

    if state.show_help {
        draw_help_overlay(f, size, &theme);
    }
}

fn draw_centered_message(f: &mut Frame, area: Rect, message: &str, color: Color) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    f.render_widget(paragraph, rows[1]);
}

fn draw_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let text = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("sproutctl v{} | greenhouse telemetry", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Rgb(150, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.bg)),
        area,
    );
}

fn draw_relay_card(f: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let status_text = state
        .relay_status
        .map(|s| s.as_str())
        .unwrap_or("UNKNOWN");
    let status_color = match state.relay_status {
        Some(sprout_common::api::RelayStatus::On) => Color::Green,
        Some(sprout_common::api::RelayStatus::Off) => theme.dim,
        None => Color::Yellow,
    };

    let control = |label: &str, enabled: bool| -> Span<'static> {
        if enabled {
            Span::styled(label.to_string(), Style::default().fg(theme.fg))
        } else {
            Span::styled(
                label.to_string(),
                Style::default().fg(theme.dim).add_modifier(Modifier::DIM),
            )
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Relay Status: "),
            Span::styled(
                status_text,
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            control("[o] Turn Relay ON", state.can_turn_on()),
            Span::raw("    "),
            control("[f] Turn Relay OFF", state.can_turn_off()),
        ]),
    ];

    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Relay ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(card, area);
}

fn draw_charts(f: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let humidity_title = match state.humidity {
        Some(v) => format!(" Current Humidity: {v:.1}% "),
        None => " Humidity ".to_string(),
    };
    draw_line_chart(
        f,
        columns[0],
        &humidity_title,
        &state.humidity_history,
        HUMIDITY_COLOR,
        theme,
    );

    let soil_title = match state.soil_moisture {
        Some(v) => format!(" Soil Moisture: {v:.1}% "),
        None => " Soil Moisture ".to_string(),
    };
    draw_line_chart(
        f,
        columns[1],
        &soil_title,
        &state.soil_moisture_history,
        SOIL_MOISTURE_COLOR,
        theme,
    );

    let temperature_title = match state.temperature {
        Some(v) => format!(" Temperature: {v:.1}\u{b0} "),
        None => " Temperature ".to_string(),
    };
    draw_temperature_bars(
        f,
        columns[2],
        &temperature_title,
        &state.temperature_history,
        theme,
    );
}

/// Rolling line chart over a history buffer, x positions 1..=N.
fn draw_line_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    history: &HistoryBuffer,
    color: Color,
    theme: &Theme,
) {
    let points = history.points();

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.dim))
                .bounds([1.0, HISTORY_CAPACITY as f64]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.dim))
                .bounds([0.0, 100.0])
                .labels(vec![
                    Span::styled("0", Style::default().fg(theme.dim)),
                    Span::styled("50", Style::default().fg(theme.dim)),
                    Span::styled("100", Style::default().fg(theme.dim)),
                ]),
        );

    f.render_widget(chart, area);
}

/// Temperature as bars, newest samples on the right. Bar heights are display
/// only; the raw (possibly negative) values stay in the history buffer.
fn draw_temperature_bars(
    f: &mut Frame,
    area: Rect,
    title: &str,
    history: &HistoryBuffer,
    theme: &Theme,
) {
    let values = history.values();

    // One column per bar inside the borders; show the newest tail that fits.
    let visible = area.width.saturating_sub(2) as usize;
    let start = values.len().saturating_sub(visible);
    let bars: Vec<(String, u64)> = values[start..]
        .iter()
        .map(|v| (String::new(), v.max(0.0).round() as u64))
        .collect();
    let bar_refs: Vec<(&str, u64)> = bars.iter().map(|(label, v)| (label.as_str(), *v)).collect();

    let ceiling = values
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(*v))
        .max(40.0)
        .round() as u64;

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(TEMPERATURE_COLOR))
        .value_style(Style::default().fg(TEMPERATURE_COLOR).bg(theme.bg))
        .max(ceiling)
        .data(&bar_refs);

    f.render_widget(chart, area);
}

fn draw_status_bar(f: &mut Frame, area: Rect, state: &DashboardState, theme: &Theme) {
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();
    let samples = state.humidity_history.len();

    let text = format!(
        " {clock} | samples {samples}/{HISTORY_CAPACITY} | q quit  o/f relay  d theme  ? help"
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(theme.dim),
        ))),
        area,
    );
}

/// Bottom-centered transient banner, MUI snackbar style.
fn draw_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    let (bg, tag) = match notification.severity {
        Severity::Success => (Color::Rgb(46, 125, 50), "OK"),
        Severity::Error => (Color::Rgb(211, 47, 47), "ERROR"),
    };

    let text = format!(" {}: {} ", tag, notification.message);
    let width = (text.len() as u16 + 2).min(area.width.saturating_sub(4));
    let banner = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(4),
        width,
        height: 3,
    };

    f.render_widget(Clear, banner);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg).fg(Color::White))
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().bg(bg).fg(Color::White),
        ));
    f.render_widget(paragraph, banner);
}

fn draw_help_overlay(f: &mut Frame, area: Rect, theme: &Theme) {
    let width = 44.min(area.width.saturating_sub(4));
    let height = 10.min(area.height.saturating_sub(4));
    let overlay = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let lines = vec![
        Line::from(""),
        Line::from("  o       turn relay ON"),
        Line::from("  f       turn relay OFF"),
        Line::from("  d       toggle dark/light mode"),
        Line::from("  Esc     dismiss notification / help"),
        Line::from("  ? / F1  toggle this help"),
        Line::from("  q       quit"),
    ];

    f.render_widget(Clear, overlay);
    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg).fg(theme.fg)),
    );
    f.render_widget(help, overlay);
}

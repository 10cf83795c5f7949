//! reqfile - browse and send the requests in a .http file
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution
//! - Watch Layer (notify) - debounced reload of the request file

use std::io;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use reqfile_tui::app::{AppActor, AppState};
use reqfile_tui::config::{Cli, Config};
use reqfile_tui::constants::{APP_NAME, APP_VERSION, UI_POLL_INTERVAL};
use reqfile_tui::messages::ui_events::{key_to_ui_event, Panel};
use reqfile_tui::messages::{NetworkCommand, RenderEvent, RenderState, RightPanel, UiEvent, WatchEvent};
use reqfile_tui::network::NetworkActor;
use reqfile_tui::store::{self, DocumentStore};
use reqfile_tui::ui::{detail_lines, method_color, response_lines, severity_color, tail_offset};
use reqfile_tui::watcher::{self, Debouncer};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse());

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .context("log file path has no file name")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(version = APP_VERSION, file = %config.file.display(), "Starting {}", APP_NAME);

    // Startup failures are fatal; everything after this point is reported in the UI
    let document = store::load_file(&config.file)?;
    let store = DocumentStore::new(document);
    let (_watcher, changes_rx) = watcher::watch_file(&config.file)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (render_event_tx, render_event_rx) = mpsc::unbounded_channel::<RenderEvent>();
    let (watch_tx, watch_rx) = mpsc::unbounded_channel::<WatchEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn watch loop
    let debouncer = Debouncer::new(
        config.debounce,
        watcher::reload_action(store.clone(), config.file.clone(), watch_tx.clone()),
    );
    tokio::spawn(watcher::run(changes_rx, debouncer, watch_tx));

    // Spawn network actor
    let network_actor = NetworkActor::new(render_event_tx, &config);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let file_name = config
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let app_actor = AppActor::new(AppState::new(store, file_name), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, render_event_rx, watch_rx));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
///
/// All drawing happens here; other layers only reach the terminal by sending
/// a `RenderState`.
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(UI_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.focus) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Keep only the newest state
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(rows[0]);

    draw_request_list(f, state, columns[0]);
    draw_right_panel(f, state, columns[1]);
    draw_status_bar(f, state, rows[1]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_request_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let items: Vec<ListItem> = state
        .requests
        .iter()
        .map(|(method, label)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:7}", method.as_str()),
                    Style::default().fg(method_color(*method)).bold(),
                ),
                Span::raw(label.clone()),
            ]))
        })
        .collect();

    let title = format!(" API - {} ", state.file_name);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(state.focus == Panel::List))
                .title(title),
        )
        .highlight_style(Style::default().fg(Color::White).bg(Color::Cyan));

    let mut list_state = ListState::default();
    list_state.select(state.selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_right_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let (title, lines) = match &state.right {
        RightPanel::Empty => (
            " Info ",
            vec![Line::from(Span::styled(
                format!("No requests found in {}", state.file_name),
                Style::default().fg(Color::DarkGray),
            ))],
        ),
        RightPanel::Detail(request) => (" Info ", detail_lines(request)),
        RightPanel::Sending(label) => (
            " Response ",
            vec![Line::from(Span::styled(
                format!("Sending request: {}", label),
                Style::default().fg(Color::Yellow),
            ))],
        ),
        RightPanel::Response(event) => (" Response ", response_lines(event)),
    };

    // Inner size excludes the border on each side
    let scroll = if state.follow_tail {
        tail_offset(&lines, area.width.saturating_sub(2), area.height.saturating_sub(2))
    } else {
        state.scroll
    };

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(state.focus == Panel::Response))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(panel, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hint = " Enter:send | Tab:focus | ↑/↓:move | End:follow | q:quit ";
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hint.chars().count() as u16)])
        .split(area);

    let status = Paragraph::new(format!(" {}", state.status.message))
        .style(Style::default().fg(severity_color(state.status.severity)));
    f.render_widget(status, chunks[0]);

    let keys = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
    f.render_widget(keys, chunks[1]);
}

//! Command handlers - business logic for processing UI, network and watch events
//!
//! The first group is the presentation interface: everything the rest of the
//! system may ask the UI to show goes through these four methods.

use chrono::{DateTime, Local};

use crate::app::AppState;
use crate::messages::ui_events::Panel;
use crate::messages::{NetworkCommand, RenderEvent, RightPanel, SessionPhase, StatusLine, WatchEvent};
use crate::models::{Request, Severity};
use crate::ui::format_elapsed;

const PAGE: u16 = 10;

fn clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

impl AppState {
    // ========================
    // Presentation interface
    // ========================

    /// Refresh the request list from the store, keeping `keep` selected
    /// if it is still in range and clamping it otherwise.
    pub fn list_requests(&mut self, keep: Option<usize>) {
        let document = self.store.snapshot();
        self.labels = document.labels();

        self.selected = match (document.len(), keep) {
            (0, _) => None,
            (len, Some(index)) => Some(index.min(len - 1)),
            (_, None) => Some(0),
        };

        if matches!(self.right, RightPanel::Detail(_) | RightPanel::Empty) {
            match self.selected.and_then(|i| document.get(i)).cloned() {
                Some(request) => self.show_detail(request),
                None => self.right = RightPanel::Empty,
            }
        }
    }

    pub fn show_detail(&mut self, request: Request) {
        self.show_status(format!("{} {}", request.method, request.url), Severity::Info);
        self.right = RightPanel::Detail(request);
        self.scroll = 0;
        self.follow_tail = false;
    }

    pub fn show_status(&mut self, message: impl Into<String>, severity: Severity) {
        self.status = StatusLine {
            message: message.into(),
            severity,
        };
    }

    /// Show an event if it belongs to the latest session.
    ///
    /// Returns false when the event was stale and dropped.
    pub fn show_render_event(&mut self, event: RenderEvent) -> bool {
        if self.active_session != Some(event.session) {
            tracing::debug!(session = event.session, active = ?self.active_session, "Dropping stale render event");
            return false;
        }

        match event.phase {
            SessionPhase::Streaming => {}
            SessionPhase::Completed => {
                let target = self.target_text();
                if let Some(summary) = &event.summary {
                    self.show_status(
                        format!(
                            "({}) {} | {}",
                            summary.status,
                            target,
                            format_elapsed(summary.elapsed)
                        ),
                        Severity::from_status(summary.status),
                    );
                }
            }
            SessionPhase::Failed => {
                let message = event.error.clone().unwrap_or_else(|| "request failed".into());
                self.show_status(message, Severity::Error);
            }
        }

        self.right = RightPanel::Response(event);
        true
    }

    fn target_text(&self) -> String {
        self.active_target
            .as_ref()
            .map(|(method, url)| format!("{} {}", method, url))
            .unwrap_or_default()
    }

    // ========================
    // Selection
    // ========================

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        if let Some(request) = self.store.get(index) {
            self.show_detail(request);
        }
    }

    pub fn select_next(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1) % self.labels.len());
        self.select(next);
    }

    pub fn select_prev(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        let prev = self
            .selected
            .and_then(|i| i.checked_sub(1))
            .unwrap_or(self.labels.len() - 1);
        self.select(prev);
    }

    // ========================
    // Focus and scrolling
    // ========================

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn focus(&mut self, panel: Panel) {
        self.focus = panel;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_tail = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.follow_tail = false;
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(PAGE);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(PAGE);
    }

    pub fn follow_tail(&mut self) {
        self.follow_tail = true;
    }

    // ========================
    // Dispatch
    // ========================

    /// Start a new session for the selected request
    pub fn prepare_dispatch(&mut self) -> Option<NetworkCommand> {
        let Some(request) = self.selected.and_then(|i| self.store.get(i)) else {
            self.show_status("No request selected", Severity::Warning);
            return None;
        };

        let session = self.next_id();
        let label = request.label();
        self.active_session = Some(session);
        self.active_target = Some((request.method, request.url.clone()));

        self.right = RightPanel::Sending(label.clone());
        self.focus = Panel::Response;
        self.scroll = 0;
        self.follow_tail = true;
        self.show_status(format!("Sending: {}", label), Severity::Warning);

        Some(NetworkCommand::Dispatch { session, request })
    }

    // ========================
    // File watching
    // ========================

    pub fn handle_watch_event(&mut self, event: WatchEvent) {
        match event {
            WatchEvent::ReloadStarted { at } => {
                self.show_status(format!("Edited at {}", clock(&at)), Severity::Warning);
            }
            WatchEvent::Reloaded { count, at } => {
                self.list_requests(self.selected);
                tracing::debug!(count, selected = ?self.selected, "Request list refreshed");
                self.show_status(format!("Reloaded at {}", clock(&at)), Severity::Success);
            }
            WatchEvent::ReloadFailed { message, at } => {
                self.show_status(format!("{} at {}", message, clock(&at)), Severity::Error);
            }
            WatchEvent::WatchFailed { message } => {
                self.show_status(message, Severity::Error);
            }
        }
    }
}

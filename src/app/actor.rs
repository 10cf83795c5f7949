//! App actor - message loop processing UI events, render events and reloads

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, RenderEvent, RenderState, UiEvent, WatchEvent};

/// App actor that owns all presentation state
///
/// Every state change ends with a fresh `RenderState` on `render_tx`; the UI
/// loop is the only consumer and the only place that draws.
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<RenderEvent>,
        mut watch_rx: mpsc::UnboundedReceiver<WatchEvent>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                }
                Some(event) = net_rx.recv() => {
                    if !self.state.show_render_event(event) {
                        continue;
                    }
                }
                Some(event) = watch_rx.recv() => {
                    self.state.handle_watch_event(event);
                }
                else => break,
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Request list
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SendRequest => {
                if let Some(cmd) = self.state.prepare_dispatch() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Response panel
            UiEvent::ScrollUp => self.state.scroll_up(1),
            UiEvent::ScrollDown => self.state.scroll_down(1),
            UiEvent::PageUp => self.state.page_up(),
            UiEvent::PageDown => self.state.page_down(),
            UiEvent::FollowTail => self.state.follow_tail(),

            // Focus
            UiEvent::ToggleFocus => self.state.toggle_focus(),
            UiEvent::Focus(panel) => self.state.focus(panel),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

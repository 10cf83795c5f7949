//! App state - presentation data plus session bookkeeping, no I/O

use crate::messages::ui_events::Panel;
use crate::messages::{RenderState, RightPanel, StatusLine};
use crate::models::{HttpMethod, SessionId};
use crate::store::DocumentStore;

/// Main application state
pub struct AppState {
    pub store: DocumentStore,
    pub file_name: String,

    // Request list, mirrored from the store on load and reload
    pub labels: Vec<(HttpMethod, String)>,
    pub selected: Option<usize>,

    // Right panel
    pub right: RightPanel,
    pub scroll: u16,
    pub follow_tail: bool,

    pub focus: Panel,
    pub status: StatusLine,

    // Dispatch sessions
    pub next_session: SessionId,
    /// Only events from this session are shown
    pub active_session: Option<SessionId>,
    /// Method and URL of the active session, for the status line
    pub active_target: Option<(HttpMethod, String)>,
}

impl AppState {
    pub fn new(store: DocumentStore, file_name: impl Into<String>) -> Self {
        let mut state = AppState {
            store,
            file_name: file_name.into(),
            labels: Vec::new(),
            selected: None,
            right: RightPanel::Empty,
            scroll: 0,
            follow_tail: false,
            focus: Panel::List,
            status: StatusLine::default(),
            next_session: 1,
            active_session: None,
            active_target: None,
        };
        state.list_requests(None);
        state
    }

    /// Generate a unique session ID
    pub fn next_id(&mut self) -> SessionId {
        let id = self.next_session;
        self.next_session += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            file_name: self.file_name.clone(),
            requests: self.labels.clone(),
            selected: self.selected,
            right: self.right.clone(),
            scroll: self.scroll,
            follow_tail: self.follow_tail,
            focus: self.focus,
            status: self.status.clone(),
        }
    }
}

//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::network::RenderEvent;
use crate::messages::ui_events::Panel;
use crate::models::{HttpMethod, Request, Severity};

/// Content of the right-hand panel
#[derive(Debug, Clone, Default)]
pub enum RightPanel {
    #[default]
    Empty,
    /// Selected request, before it is sent
    Detail(Request),
    /// Dispatch started, nothing back yet
    Sending(String),
    /// Latest event of the active session
    Response(RenderEvent),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub severity: Severity,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub file_name: String,

    // Request list
    pub requests: Vec<(HttpMethod, String)>,
    pub selected: Option<usize>,

    // Right panel
    pub right: RightPanel,
    pub scroll: u16,
    /// Keep a growing stream scrolled to its last line
    pub follow_tail: bool,

    pub focus: Panel,
    pub status: StatusLine,
}

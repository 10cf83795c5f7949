//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, Network
//! and Watch layers.

pub mod ui_events;
pub mod network;
pub mod watch;
pub mod render;

pub use ui_events::UiEvent;
pub use network::{BodyFormat, NetworkCommand, RenderEvent, SessionPhase};
pub use watch::{FileChange, WatchEvent};
pub use render::{RenderState, RightPanel, StatusLine};

//! # reqfile TUI
//!
//! Browse the requests in a `.http` file, fire them, and watch the responses
//! (including Server-Sent-Event streams) arrive.
//!
//! ## Features
//! - Tolerant `.http` parser: `### name`, `METHOD URL`, headers, raw bodies
//! - Live reload on file edits, debounced, keeping the selection
//! - Buffered responses with JSON pretty-printing
//! - Streaming `text/event-stream` responses, tail of the last 100 lines
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous drawing, the only consumer of render state
//! - App Layer - presentation state, latest-session-wins filtering
//! - Network Layer (Tokio) - one task per dispatch session
//! - Watch Layer (notify) - debounced reparse into the shared store

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod store;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;
pub mod watcher;

// Re-export commonly used types
pub use models::{Document, HttpMethod, Request, ResponseSummary, SessionId, Severity};
pub use parser::{is_valid_header_name, parse};
pub use store::DocumentStore;
pub use messages::{NetworkCommand, RenderEvent, RenderState, UiEvent, WatchEvent};
pub use app::{AppActor, AppState};
pub use network::NetworkActor;
pub use config::Config;

//! Network messages - communication between App and Network layers

use crate::models::{Request, ResponseSummary, SessionId, Severity};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Start a new dispatch session. Earlier sessions keep running.
    Dispatch {
        session: SessionId,
        request: Request,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Where a session is in its lifecycle when an event is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Stream open, more lines may follow
    Streaming,
    Completed,
    Failed,
}

/// How the body text of an event should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// Pretty-printed JSON
    Json,
    /// Raw text, either non-JSON or unparseable
    Text,
    /// Most recent lines of an event stream
    Stream,
}

/// One render update for one dispatch session
#[derive(Debug, Clone)]
pub struct RenderEvent {
    pub session: SessionId,
    pub phase: SessionPhase,
    /// Absent when the call failed before a response arrived
    pub summary: Option<ResponseSummary>,
    pub body: String,
    pub format: BodyFormat,
    pub severity: Severity,
    pub error: Option<String>,
}

impl RenderEvent {
    pub fn streaming(session: SessionId, summary: ResponseSummary, body: String) -> Self {
        RenderEvent {
            session,
            phase: SessionPhase::Streaming,
            severity: Severity::from_status(summary.status),
            summary: Some(summary),
            body,
            format: BodyFormat::Stream,
            error: None,
        }
    }

    pub fn completed(
        session: SessionId,
        summary: ResponseSummary,
        body: String,
        format: BodyFormat,
    ) -> Self {
        RenderEvent {
            session,
            phase: SessionPhase::Completed,
            severity: Severity::from_status(summary.status),
            summary: Some(summary),
            body,
            format,
            error: None,
        }
    }

    pub fn failed(
        session: SessionId,
        summary: Option<ResponseSummary>,
        body: String,
        format: BodyFormat,
        error: impl ToString,
    ) -> Self {
        RenderEvent {
            session,
            phase: SessionPhase::Failed,
            summary,
            body,
            format,
            severity: Severity::Error,
            error: Some(error.to_string()),
        }
    }

    /// Check if this is a terminal event (no more events expected for this session)
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed | SessionPhase::Failed)
    }
}

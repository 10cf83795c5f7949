//! HTTP client wrapper - executes one dispatch session and emits render events

use std::time::{Duration, Instant};

use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::error::DispatchError;
use crate::messages::{BodyFormat, RenderEvent};
use crate::models::{Request, ResponseSummary, SessionId};
use crate::network::stream::{LineSplitter, StreamBuffer};

/// Per-session limits
#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions {
    /// Deadline for the whole call, body included
    pub timeout: Duration,
    /// Lines retained for event-stream responses
    pub stream_buffer_lines: usize,
}

/// Build a request from a parsed request block
fn build_request(
    client: &reqwest::Client,
    request: &Request,
    timeout: Duration,
) -> reqwest::RequestBuilder {
    let mut req_builder = client
        .request(request.method.to_reqwest(), &request.url)
        .timeout(timeout);

    for (key, value) in &request.headers {
        req_builder = req_builder.header(key.as_str(), value.as_str());
    }

    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    req_builder
}

fn summarize(
    resp: &reqwest::Response,
    elapsed: Duration,
    line_count: Option<usize>,
) -> ResponseSummary {
    let headers = resp
        .headers()
        .iter()
        .map(|(k, v)| {
            let value = v.to_str().map(str::to_string).unwrap_or_else(|_| {
                String::from_utf8_lossy(v.as_bytes()).into_owned()
            });
            (k.as_str().to_string(), value)
        })
        .collect();

    ResponseSummary {
        status: resp.status().as_u16(),
        reason: resp.status().canonical_reason().unwrap_or_default().to_string(),
        headers,
        elapsed,
        line_count,
    }
}

fn is_event_stream(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/event-stream"))
}

/// Pretty-print JSON with two-space indentation, fall back to raw text
pub fn format_body(bytes: &[u8]) -> (String, BodyFormat) {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(bytes) {
        if let Ok(pretty) = serde_json::to_string_pretty(&json) {
            return (pretty, BodyFormat::Json);
        }
    }
    (String::from_utf8_lossy(bytes).into_owned(), BodyFormat::Text)
}

/// Execute one dispatch session.
///
/// Every event for `session` goes to `events_tx` in order; the last one is
/// always terminal. Nothing here knows about newer sessions, the consumer
/// decides which session is shown.
pub async fn dispatch(
    client: &reqwest::Client,
    session: SessionId,
    request: Request,
    options: DispatchOptions,
    events_tx: &mpsc::UnboundedSender<RenderEvent>,
) {
    let start = Instant::now();
    let req_builder = build_request(client, &request, options.timeout);

    let resp = match req_builder.send().await {
        Ok(resp) => resp,
        Err(e) => {
            let err = DispatchError::from_reqwest(e, options.timeout);
            tracing::warn!(session, url = %request.url, error = %err, "Request failed");
            let _ = events_tx.send(RenderEvent::failed(
                session,
                None,
                String::new(),
                BodyFormat::Text,
                err,
            ));
            return;
        }
    };

    tracing::info!(
        session,
        status = resp.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Response received"
    );

    if is_event_stream(&resp) {
        stream_response(session, resp, start, options, events_tx).await;
    } else {
        buffered_response(session, resp, start, options, events_tx).await;
    }
}

async fn buffered_response(
    session: SessionId,
    resp: reqwest::Response,
    start: Instant,
    options: DispatchOptions,
    events_tx: &mpsc::UnboundedSender<RenderEvent>,
) {
    let mut summary = summarize(&resp, start.elapsed(), None);

    match resp.bytes().await {
        Ok(bytes) => {
            summary.elapsed = start.elapsed();
            let (body, format) = format_body(&bytes);
            let _ = events_tx.send(RenderEvent::completed(session, summary, body, format));
        }
        Err(e) => {
            summary.elapsed = start.elapsed();
            let err = DispatchError::from_reqwest(e, options.timeout);
            tracing::warn!(session, error = %err, "Reading body failed");
            let _ = events_tx.send(RenderEvent::failed(
                session,
                Some(summary),
                String::new(),
                BodyFormat::Text,
                err,
            ));
        }
    }
}

async fn stream_response(
    session: SessionId,
    resp: reqwest::Response,
    start: Instant,
    options: DispatchOptions,
    events_tx: &mpsc::UnboundedSender<RenderEvent>,
) {
    let mut summary = summarize(&resp, start.elapsed(), Some(0));
    let mut buffer = StreamBuffer::new(options.stream_buffer_lines);
    let mut splitter = LineSplitter::new();

    let _ = events_tx.send(RenderEvent::streaming(session, summary.clone(), String::new()));

    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                for line in splitter.push(&bytes) {
                    buffer.push(line);
                    summary.elapsed = start.elapsed();
                    summary.line_count = Some(buffer.total());
                    let _ = events_tx.send(RenderEvent::streaming(
                        session,
                        summary.clone(),
                        buffer.visible(),
                    ));
                }
            }
            Err(e) => {
                summary.elapsed = start.elapsed();
                let err = DispatchError::from_reqwest(e, options.timeout);
                tracing::warn!(session, lines = buffer.total(), error = %err, "Stream error");
                let _ = events_tx.send(RenderEvent::failed(
                    session,
                    Some(summary),
                    buffer.visible(),
                    BodyFormat::Stream,
                    format!("stream error: {}", err),
                ));
                return;
            }
        }
    }

    if let Some(line) = splitter.finish() {
        buffer.push(line);
    }

    summary.elapsed = start.elapsed();
    summary.line_count = Some(buffer.total());
    tracing::info!(session, lines = buffer.total(), "Stream closed");
    let _ = events_tx.send(RenderEvent::completed(
        session,
        summary,
        buffer.visible(),
        BodyFormat::Stream,
    ));
}

/// Create an HTTP client with default configuration
///
/// Deadlines are applied per request, not on the client.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_body_pretty_prints_json() {
        let (body, format) = format_body(br#"{"a":1,"b":[true,null]}"#);
        assert_eq!(format, BodyFormat::Json);
        assert_eq!(body, "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}");
    }

    #[test]
    fn test_format_body_falls_back_to_text() {
        let (body, format) = format_body(b"<html>not json</html>");
        assert_eq!(format, BodyFormat::Text);
        assert_eq!(body, "<html>not json</html>");
    }
}

//! Document parser - turns loosely formatted `.http` text into requests
//!
//! The scan is a fold over lines: a [`Cursor`] is moved through every line
//! and classifies it in a fixed priority order:
//!
//! 1. a bare `###` closes the open request
//! 2. outside a body, `//` and `--` lines are skipped, as are blank lines
//!    while no request is open
//! 3. `#` lines (but not `###`) are comments
//! 4. `### name` sets the name of the next request, replacing any earlier one
//! 5. `METHOD URL` closes the open request and opens a new one
//! 6. before the body: `{` / `[` start the body and are kept, a blank line
//!    starts the body and is dropped, a header-shaped line is a header, any
//!    other line starts the body and is kept
//! 7. inside the body, the raw line is appended
//!
//! Parsing never fails. Fragments without a method line are dropped.

pub mod header;

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Document, HttpMethod, Request};

pub use header::is_valid_header_name;

fn request_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS)\s+(.+)$")
            .expect("request line pattern is valid")
    })
}

/// Parse a whole file's text into a [`Document`]
pub fn parse(text: &str) -> Document {
    let requests = text.lines().fold(Cursor::default(), Cursor::feed).finish();
    tracing::debug!(count = requests.len(), "Parsed document");
    Document::new(requests)
}

/// The request being assembled, if any
#[derive(Debug, Default)]
enum Block {
    #[default]
    Empty,
    Building {
        request: Request,
        body_lines: Vec<String>,
        in_body: bool,
    },
}

impl Block {
    fn in_body(&self) -> bool {
        matches!(self, Block::Building { in_body: true, .. })
    }

    fn is_open(&self) -> bool {
        matches!(self, Block::Building { .. })
    }

    /// Finish the open request, attaching accumulated body lines
    fn close(self) -> Option<Request> {
        match self {
            Block::Empty => None,
            Block::Building {
                mut request,
                body_lines,
                ..
            } => {
                if !body_lines.is_empty() {
                    request.body = Some(body_lines.join("\n"));
                }
                Some(request)
            }
        }
    }
}

/// Scan state threaded through the fold
#[derive(Debug, Default)]
struct Cursor {
    pending_name: String,
    block: Block,
    requests: Vec<Request>,
}

impl Cursor {
    fn feed(mut self, raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed == "###" {
            self.close();
            self.pending_name.clear();
            return self;
        }

        if !self.block.in_body() {
            if trimmed.starts_with("//") || trimmed.starts_with("--") {
                return self;
            }
            if trimmed.is_empty() && !self.block.is_open() {
                return self;
            }
        }

        if trimmed.starts_with('#') && !trimmed.starts_with("###") {
            return self;
        }

        if let Some(name) = trimmed.strip_prefix("###") {
            self.pending_name = name.trim().to_string();
            return self;
        }

        if let Some(request) = self.request_line(trimmed) {
            self.close();
            self.block = Block::Building {
                request,
                body_lines: Vec::new(),
                in_body: false,
            };
            return self;
        }

        if let Block::Building {
            request,
            body_lines,
            in_body,
        } = &mut self.block
        {
            if !*in_body {
                if trimmed == "{" || trimmed == "[" {
                    *in_body = true;
                    body_lines.push(raw.to_string());
                    return self;
                }
                if trimmed.is_empty() {
                    *in_body = true;
                    return self;
                }
                if let Some((key, value)) = header_line(raw, trimmed) {
                    request.headers.insert(key, value);
                    return self;
                }
                *in_body = true;
            }
            body_lines.push(raw.to_string());
        }

        self
    }

    /// Match `METHOD URL`, consuming the pending name
    fn request_line(&mut self, trimmed: &str) -> Option<Request> {
        let caps = request_line_regex().captures(trimmed)?;
        let method = HttpMethod::from_token(caps.get(1)?.as_str())?;
        let mut request = Request::new(method, caps.get(2)?.as_str());
        request.name = std::mem::take(&mut self.pending_name);
        Some(request)
    }

    fn close(&mut self) {
        if let Some(request) = std::mem::take(&mut self.block).close() {
            self.requests.push(request);
        }
    }

    fn finish(mut self) -> Vec<Request> {
        self.close();
        self.requests
    }
}

/// Split a header-shaped line into a trimmed key and value
fn header_line(raw: &str, trimmed: &str) -> Option<(String, String)> {
    if trimmed.starts_with('"') {
        return None;
    }
    let (key, value) = raw.split_once(':')?;
    let key = key.trim();
    if !is_valid_header_name(key) {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Identity of one dispatch session, increasing per trigger
pub type SessionId = u64;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Case-sensitive lookup; only the uppercase verb is recognized
    pub fn from_token(token: &str) -> Option<HttpMethod> {
        HttpMethod::ALL.into_iter().find(|m| m.as_str() == token)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::HEAD => reqwest::Method::HEAD,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed request block
///
/// Never mutated once the parser hands it out. `method` and `url` are always
/// present; `url` is kept raw and left to the HTTP client to reject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// From a preceding `### <name>` line, empty if absent
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Request {
            name: String::new(),
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Display label: the name, or `METHOD URL` when unnamed
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("{} {}", self.method, self.url)
        } else {
            self.name.clone()
        }
    }

    /// Headers sorted by key, for stable display
    pub fn sorted_headers(&self) -> Vec<(&str, &str)> {
        let mut headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        headers.sort_unstable();
        headers
    }
}

/// Ordered requests from one parse pass over one file's text
///
/// Replaced wholesale on reload, never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    requests: Vec<Request>,
}

impl Document {
    pub fn new(requests: Vec<Request>) -> Self {
        Document { requests }
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn get(&self, index: usize) -> Option<&Request> {
        self.requests.get(index)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn labels(&self) -> Vec<(HttpMethod, String)> {
        self.requests.iter().map(|r| (r.method, r.label())).collect()
    }
}

/// Visual classification carried alongside every message and render event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// >=400 error, >=300 warning, otherwise success
    pub fn from_status(status: u16) -> Severity {
        if status >= 400 {
            Severity::Error
        } else if status >= 300 {
            Severity::Warning
        } else {
            Severity::Success
        }
    }
}

/// Status, headers and timing of a response, as shown above its body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub elapsed: Duration,
    /// Total lines received, present only for streaming responses
    pub line_count: Option<usize>,
}

impl ResponseSummary {
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

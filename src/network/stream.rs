//! Event-stream helpers - line splitting and the capped render buffer

use std::collections::VecDeque;

/// Splits a chunked byte stream into lines.
///
/// Chunk boundaries can fall anywhere, including inside a multi-byte
/// character, so bytes are held until a newline arrives.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every line it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                lines.push(decode_line(&self.pending));
                self.pending.clear();
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    /// Flush an unterminated final line when the stream ends
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = decode_line(&self.pending);
        self.pending.clear();
        Some(line)
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Keeps the most recent `capacity` lines and counts everything seen
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    total: usize,
}

impl StreamBuffer {
    pub fn new(capacity: usize) -> Self {
        StreamBuffer {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            self.total += 1;
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        self.total += 1;
    }

    /// Lines received so far, including evicted ones
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn retained(&self) -> usize {
        self.lines.len()
    }

    /// Retained lines joined for display
    pub fn visible(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }
}

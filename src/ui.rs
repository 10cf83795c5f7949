//! Styling helpers and line builders for the request and response panels

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::messages::{BodyFormat, RenderEvent};
use crate::models::{HttpMethod, Request, Severity};

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::PATCH => Color::Cyan,
        HttpMethod::DELETE => Color::Red,
        HttpMethod::HEAD | HttpMethod::OPTIONS => Color::Magenta,
    }
}

/// Severity color
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Gray,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Compact elapsed time: milliseconds below one second, seconds above
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Scroll offset that puts the last wrapped row of `lines` at the bottom of
/// a panel `width` columns wide showing `visible` rows
pub fn tail_offset(lines: &[Line<'static>], width: u16, visible: u16) -> u16 {
    let rows = Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_sub(visible)
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Yellow)))
}

/// Lines for the detail view of a request that has not been sent
pub fn detail_lines(request: &Request) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            request.method.as_str(),
            Style::default().fg(method_color(request.method)).bold(),
        ),
        Span::raw(" "),
        Span::styled(request.url.clone(), Style::default().fg(Color::Yellow)),
    ])];

    for (key, value) in request.sorted_headers() {
        lines.push(Line::from(vec![
            Span::raw(format!("{}: ", key)),
            Span::styled(value.to_string(), Style::default().fg(Color::Gray)),
        ]));
    }

    if let Some(body) = &request.body {
        lines.push(Line::default());
        lines.extend(body.lines().map(|l| Line::from(l.to_string())));
    }

    lines
}

/// Lines for one render event: header summary, then body
pub fn response_lines(event: &RenderEvent) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let color = severity_color(event.severity);

    if let Some(summary) = &event.summary {
        lines.push(Line::from(Span::styled(
            summary.status_line(),
            Style::default().fg(severity_color(Severity::from_status(summary.status))).bold(),
        )));
        lines.push(heading("Headers:"));
        for (key, value) in &summary.headers {
            lines.push(Line::from(vec![
                Span::raw(format!("  {}: ", key)),
                Span::styled(value.clone(), Style::default().fg(Color::DarkGray)),
            ]));
        }

        let mut timing = vec![
            Span::raw("  Duration: "),
            Span::styled(format_elapsed(summary.elapsed), Style::default().fg(Color::Blue)),
        ];
        if let Some(count) = summary.line_count {
            timing.push(Span::raw(format!(" | Lines: {}", count)));
        }
        lines.push(Line::from(timing));
        lines.push(Line::default());
    }

    match event.format {
        BodyFormat::Stream => {
            if event.summary.is_some() {
                lines.push(heading("Stream Data:"));
            }
            lines.extend(event.body.lines().map(|l| Line::from(l.to_string())));
        }
        BodyFormat::Json if event.severity != Severity::Error => {
            lines.push(heading("Body:"));
            lines.extend(highlight_json(&event.body));
        }
        BodyFormat::Json | BodyFormat::Text => {
            if event.summary.is_some() {
                lines.push(heading("Body:"));
            }
            let style = if event.severity == Severity::Error {
                Style::default().fg(color)
            } else {
                Style::default()
            };
            lines.extend(
                event
                    .body
                    .lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), style))),
            );
        }
    }

    if let Some(error) = &event.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red).bold(),
        )));
    }

    lines
}

/// Simple JSON syntax highlighting for pretty-printed text
///
/// Keys cyan, string values green, numbers yellow, literals magenta.
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut chars = line.char_indices().peekable();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(plain)));
        }
    };

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                flush(&mut plain, &mut spans);
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        end = i + 1;
                        break;
                    }
                }
                let token = &line[start..end];
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(token.to_string(), Style::default().fg(color)));
            }
            '{' | '}' | '[' | ']' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            '-' | '0'..='9' => {
                flush(&mut plain, &mut spans);
                let mut token = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_digit() || matches!(next, '.' | 'e' | 'E' | '+' | '-') {
                        token.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                spans.push(Span::styled(token, Style::default().fg(Color::Yellow)));
            }
            't' | 'f' | 'n' => {
                let rest = &line[start..];
                let literal = ["true", "false", "null"]
                    .into_iter()
                    .find(|lit| rest.starts_with(lit));
                match literal {
                    Some(lit) => {
                        flush(&mut plain, &mut spans);
                        spans.push(Span::styled(lit, Style::default().fg(Color::Magenta)));
                        for _ in 1..lit.len() {
                            chars.next();
                        }
                    }
                    None => plain.push(c),
                }
            }
            _ => plain.push(c),
        }
    }
    flush(&mut plain, &mut spans);

    Line::from(spans)
}

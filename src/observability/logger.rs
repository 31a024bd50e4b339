//! Structured JSON logger
//!
//! Every request leaves two lines: a query trace (event = uppercased
//! response format, plus the raw SQL) and a `REQUEST` timing line. Error
//! events carry the failure detail that is deliberately kept out of HTTP
//! response bodies.
//!
//! Output rules:
//! - one line per event, valid JSON
//! - `event` first, then `severity`, then fields sorted by key
//! - synchronous, unbuffered

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-request diagnostic detail (query traces)
    Trace,
    /// Normal operations (timings, startup)
    Info,
    /// Request failures
    Error,
    /// Unrecoverable, process exits
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured logger emitting one JSON object per line
pub struct Logger;

impl Logger {
    /// Query trace (stdout)
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::emit(&mut io::stdout(), Severity::Trace, event, fields);
    }

    /// Normal operation (stdout)
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(&mut io::stdout(), Severity::Info, event, fields);
    }

    /// Request failure (stderr)
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(&mut io::stderr(), Severity::Error, event, fields);
    }

    /// Unrecoverable failure (stderr)
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::emit(&mut io::stderr(), Severity::Fatal, event, fields);
    }

    fn emit<W: Write>(writer: &mut W, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let mut line = String::with_capacity(128);

        line.push_str("{\"event\":");
        push_json_string(&mut line, event);
        line.push_str(",\"severity\":");
        push_json_string(&mut line, severity.as_str());

        // Sorted keys keep log output deterministic
        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push(',');
            push_json_string(&mut line, key);
            line.push(':');
            push_json_string(&mut line, value);
        }

        line.push_str("}\n");

        // One write_all call so concurrent requests never interleave lines
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Append `s` as a JSON string literal, quotes included
fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
fn capture(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::emit(&mut buffer, severity, event, fields);
    String::from_utf8(buffer).unwrap()
}

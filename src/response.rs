//! Splitting a decoded response into output/debug/warnings sections.
//!
//! The service echoes a token as the first sixteen characters of the body and
//! repeats the same token between sections. Nothing here inspects HTTP status;
//! by the time we classify, the transport has either produced text or timed
//! out.

use std::collections::VecDeque;
use std::time::Duration;

/// Length of the echoed section marker, in characters.
pub const MARKER_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    TimedOut,
}

/// The semantic pieces of one response. `debug` and `warnings` are absent on
/// timeout and for degenerate responses with fewer sections than expected.
#[derive(Debug, Clone)]
pub struct Sections {
    pub status: Status,
    pub output: String,
    pub debug: Option<String>,
    pub warnings: Option<String>,
}

/// Classify a (possibly absent) decoded response.
///
/// Absence means the transport gave up after `timeout`; that is a normal
/// outcome, not an error, and the output becomes a human-readable message.
pub fn classify(text: Option<&str>, timeout: Duration) -> Sections {
    match text {
        Some(text) => split_sections(text),
        None => Sections {
            status: Status::TimedOut,
            output: format!(
                "Request timed out after {} seconds.",
                timeout.as_millis() as f64 / 1000.0
            ),
            debug: None,
            warnings: None,
        },
    }
}

fn split_sections(text: &str) -> Sections {
    let boundary = text
        .char_indices()
        .nth(MARKER_LEN)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (marker, rest) = text.split_at(boundary);

    let mut segments: VecDeque<&str> = if marker.is_empty() {
        VecDeque::new()
    } else {
        rest.split(marker).collect()
    };

    // First segment is output, second is debug, the last one warnings.
    let output = segments
        .pop_front()
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let debug = segments.pop_front().map(|s| s.trim().to_string());
    let warnings = segments.pop_back().map(|s| s.trim().to_string());

    Sections { status: Status::Passed, output, debug, warnings }
}

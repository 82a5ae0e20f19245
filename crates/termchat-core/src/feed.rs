//! Buffered line splitting for the live transcript stream.

use crate::classify::LineClassifier;
use termchat_types::{ClassifiedLine, StreamOrigin};

/// Turns arbitrary text chunks from the PTY into classified display lines.
///
/// The PTY delivers output in chunks that do not respect line boundaries;
/// the feed holds back a trailing partial line until its newline arrives so
/// the classifier only ever sees complete lines. This is the only stateful
/// piece of the subsystem.
#[derive(Debug, Default)]
pub struct TranscriptFeed {
    /// Trailing partial line awaiting its newline.
    buffer: String,
}

impl TranscriptFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and classify every line it completes.
    pub fn push_chunk(&mut self, chunk: &str, origin: StreamOrigin) -> Vec<ClassifiedLine> {
        self.buffer.push_str(chunk);
        let mut lines = Vec::new();

        while let Some(newline_pos) = self.buffer.find('\n') {
            let line = self.buffer[..newline_pos].to_string();
            self.buffer = self.buffer[newline_pos + 1..].to_string();
            lines.extend(LineClassifier::classify(&line, origin));
        }

        lines
    }

    /// Classify whatever partial line remains (stream ended without a
    /// trailing newline).
    pub fn finish(&mut self, origin: StreamOrigin) -> Vec<ClassifiedLine> {
        let rest = std::mem::take(&mut self.buffer);
        LineClassifier::classify(&rest, origin)
    }

    /// Drop any buffered partial line.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

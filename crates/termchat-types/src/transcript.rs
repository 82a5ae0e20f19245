//! View models for classified transcript lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a raw transcript line came from when it is not a structured record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamOrigin {
    Stdout,
    Stderr,
    System,
    Command,
}

impl StreamOrigin {
    /// Display tag used as the line label, e.g. `"[stdout]"`.
    pub fn label(&self) -> &'static str {
        match self {
            StreamOrigin::Stdout => "[stdout]",
            StreamOrigin::Stderr => "[stderr]",
            StreamOrigin::System => "[system]",
            StreamOrigin::Command => "[command]",
        }
    }

    /// Semantic color key for the presentation layer.
    pub fn color_key(&self) -> &'static str {
        match self {
            StreamOrigin::Stdout => "stdout",
            StreamOrigin::Stderr => "stderr",
            StreamOrigin::System => "system",
            StreamOrigin::Command => "command",
        }
    }
}

impl fmt::Display for StreamOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color_key())
    }
}

/// One normalized display line of the live transcript.
///
/// Created per raw line at classification time, never mutated afterwards.
/// Lines are independent of each other; the classifier keeps no cross-line
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Source tag, e.g. `"[tool]"`, `"[reasoning]"`, `"[stdout]"`.
    pub label: String,
    pub text: String,
    /// Semantic category the presentation layer maps to a color.
    pub color_key: String,
}

impl ClassifiedLine {
    pub fn new(
        label: impl Into<String>,
        text: impl Into<String>,
        color_key: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            color_key: color_key.into(),
        }
    }

    /// A raw line tagged with its stream origin.
    pub fn from_stream(origin: StreamOrigin, text: impl Into<String>) -> Self {
        Self::new(origin.label(), text, origin.color_key())
    }
}

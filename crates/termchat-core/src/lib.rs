//! Transcript interpretation for Termchat.
//!
//! Deterministic parsers that turn the hosted CLI's free-form text output
//! (cost summaries, context usage, release notes, mixed plain/JSON
//! transcript lines) into the typed view models in `termchat-types`. Every
//! parser is a pure transform: tolerant of malformed input, no I/O, no
//! cross-call state.

mod classify;
mod context;
mod cost;
mod error;
mod feed;
mod grid;
mod notes;
mod sanitize;

pub use classify::LineClassifier;
pub use context::ContextReportParser;
pub use cost::CostReportParser;
pub use error::TermchatError;
pub use feed::TranscriptFeed;
pub use grid::{build_grid, to_rows, CellStyle, GridTheme, GRID_CELLS, GRID_COLS};
pub use notes::ReleaseNotesParser;
pub use sanitize::strip_ansi;

/// Result type for Termchat operations.
pub type Result<T> = std::result::Result<T, TermchatError>;

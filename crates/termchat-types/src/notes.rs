//! View models for the assistant's release notes output.

use serde::{Deserialize, Serialize};

/// One version entry from a release notes block.
///
/// `changes` is non-empty by construction: the parser discards version
/// headers that accumulated no bullets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNotesEntry {
    pub version: String,
    pub changes: Vec<String>,
}

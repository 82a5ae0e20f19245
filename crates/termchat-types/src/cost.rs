//! View models for the assistant's cost summary output.

use serde::{Deserialize, Serialize};

/// Parsed `/cost` summary block.
///
/// Every monetary and token field keeps the CLI's original formatting
/// (`"$0.28"`, `"1.2k"`) — this is a display-value extractor, not a unit
/// converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    /// Total cost as printed, e.g. `"$12.3400"`. Always present: a block
    /// without it does not parse at all.
    pub total_cost: String,
    /// API-time duration as printed, `"—"` when the line is absent.
    pub api_duration: String,
    /// Wall-clock duration as printed, `"—"` when the line is absent.
    pub wall_duration: String,
    #[serde(default)]
    pub lines_added: u64,
    #[serde(default)]
    pub lines_removed: u64,
    /// Per-model usage lines in the order the CLI printed them.
    #[serde(default)]
    pub models: Vec<ModelUsage>,
}

/// One per-model usage line from the cost summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsage {
    pub name: String,
    pub input_tokens: String,
    pub output_tokens: String,
    pub cache_read_tokens: String,
    pub cache_write_tokens: String,
    /// Only some model lines carry a web search count.
    #[serde(default)]
    pub web_search_tokens: Option<String>,
    pub cost: String,
}

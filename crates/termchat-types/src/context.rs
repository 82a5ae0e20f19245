//! View models for the assistant's context usage output.

use serde::{Deserialize, Serialize};

/// Parsed `/context` usage block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextReport {
    /// Model identifier from the summary line.
    pub model: String,
    pub used_tokens: u64,
    pub max_tokens: u64,
    /// Overall context usage, 0–100.
    pub percentage: f64,
    /// Category breakdown in source order. Order carries display meaning
    /// and is load-bearing for grid allocation; never re-sort it.
    #[serde(default)]
    pub categories: Vec<ContextCategory>,
    /// Optional titled tables (configured tools, memory files, …).
    #[serde(default)]
    pub sub_tables: Vec<SubTable>,
}

/// One category line of the context breakdown.
///
/// Percentages are independent inputs straight from the CLI; they are not
/// required to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextCategory {
    pub name: String,
    pub tokens: u64,
    pub percentage: f64,
}

/// A titled header/rows table embedded in the context block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One cell of the context usage grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub icon: char,
    /// Semantic color key resolved by the presentation layer.
    pub color: String,
    /// Name of the category this cell belongs to.
    pub category: String,
}

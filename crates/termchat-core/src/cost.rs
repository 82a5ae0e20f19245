//! Parser for the CLI's `/cost` summary block.

use crate::sanitize::strip_ansi;
use once_cell::sync::Lazy;
use regex::Regex;
use termchat_types::{CostReport, ModelUsage};
use tracing::{debug, trace};

/// Shown when a duration line is missing from the block.
const DURATION_PLACEHOLDER: &str = "—";

/// Required anchor: `Total cost: $12.3400`. A block without it is not a
/// cost report at all.
static TOTAL_COST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Total cost:\s*(\$[0-9][0-9.,]*)").expect("Invalid total cost regex")
});

static API_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Total duration \(API\):\s*(\S[^\n]*?)\s*$")
        .expect("Invalid API duration regex")
});

static WALL_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Total duration \(wall\):\s*(\S[^\n]*?)\s*$")
        .expect("Invalid wall duration regex")
});

static CODE_CHANGES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Total code changes:\s*([0-9][0-9,]*)\s+lines? added,\s*([0-9][0-9,]*)\s+lines? removed")
        .expect("Invalid code changes regex")
});

/// Per-model usage line, e.g.
/// `claude-opus: 1.2k input, 450k output, 0 cache read, 0 cache write ($0.28)`
/// with an optional `, <n> web search` before the cost.
// Horizontal whitespace only: `\s` would let a bare label line (e.g.
// `Usage by model:`) swallow the usage line under it.
static MODEL_USAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*([^:\n]+?):[ \t]*",
        r"([0-9][0-9.,]*[kKmMbB]?) input,[ \t]*",
        r"([0-9][0-9.,]*[kKmMbB]?) output,[ \t]*",
        r"([0-9][0-9.,]*[kKmMbB]?) cache read,[ \t]*",
        r"([0-9][0-9.,]*[kKmMbB]?) cache write",
        r"(?:,[ \t]*([0-9][0-9.,]*[kKmMbB]?) web search)?",
        r"[ \t]*\((\$[0-9][0-9.,]*)\)",
    ))
    .expect("Invalid model usage regex")
});

/// Parser for the cost summary block printed by the hosted CLI.
///
/// Token and cost captures are kept as the CLI formatted them; nothing is
/// normalized to numbers.
pub struct CostReportParser;

impl CostReportParser {
    /// Parse a cost summary block.
    ///
    /// Returns `None` when the `Total cost:` anchor is missing or
    /// malformed, regardless of what else matched — a corrupted report
    /// renders nothing rather than a partial one. Missing durations and
    /// code-change counts are optional and degrade to placeholder/zero.
    pub fn parse(text: &str) -> Option<CostReport> {
        let clean = strip_ansi(text);

        let total_cost = match TOTAL_COST_RE.captures(&clean) {
            Some(caps) => caps[1].to_string(),
            None => {
                debug!(target: "termchat::cost", "No 'Total cost:' anchor, dropping block");
                return None;
            }
        };

        let api_duration = API_DURATION_RE
            .captures(&clean)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| DURATION_PLACEHOLDER.to_string());
        let wall_duration = WALL_DURATION_RE
            .captures(&clean)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| DURATION_PLACEHOLDER.to_string());

        let (lines_added, lines_removed) = CODE_CHANGES_RE
            .captures(&clean)
            .map(|c| {
                (
                    parse_count(&c[1]),
                    parse_count(&c[2]),
                )
            })
            .unwrap_or((0, 0));

        let mut models = Vec::new();
        for caps in MODEL_USAGE_RE.captures_iter(&clean) {
            let name = caps[1].trim().to_string();
            trace!(target: "termchat::cost", "Model usage line: {}", name);
            models.push(ModelUsage {
                name,
                input_tokens: caps[2].to_string(),
                output_tokens: caps[3].to_string(),
                cache_read_tokens: caps[4].to_string(),
                cache_write_tokens: caps[5].to_string(),
                web_search_tokens: caps.get(6).map(|m| m.as_str().to_string()),
                cost: caps[7].to_string(),
            });
        }

        Some(CostReport {
            total_cost,
            api_duration,
            wall_duration,
            lines_added,
            lines_removed,
            models,
        })
    }
}

/// Parse a comma-grouped line count; malformed counts degrade to 0.
fn parse_count(s: &str) -> u64 {
    s.replace(',', "").parse().unwrap_or(0)
}

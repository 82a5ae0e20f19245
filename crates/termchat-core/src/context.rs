//! Parser for the CLI's `/context` usage block.
//!
//! The block leads with a model/token summary line, then a colon-separated
//! category breakdown, then optional titled markdown tables (configured
//! tools, memory files). The summary line is the required anchor; without
//! it the whole block is dropped and no grid renders.

use crate::sanitize::strip_ansi;
use crate::{Result, TermchatError};
use once_cell::sync::Lazy;
use regex::Regex;
use termchat_types::{ContextCategory, ContextReport, SubTable};
use tracing::{debug, trace};

/// Summary anchor: `claude-opus-4-6 · 48.2k/200k tokens (24%)`.
/// Separator between model and counts varies by CLI version.
static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*([A-Za-z0-9][\w.\-/]*)[ \t]*[·•|]?[ \t]*",
        r"([0-9][0-9.,]*[kKmM]?)[ \t]*/[ \t]*([0-9][0-9.,]*[kKmM]?)[ \t]+tokens?[ \t]*",
        r"\(([0-9]+(?:\.[0-9]+)?)%\)",
    ))
    .expect("Invalid context summary regex")
});

/// Category line: `System prompt: 3.2k tokens (1.6%)`.
static CATEGORY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][^:\n]*):\s*([0-9][0-9.,]*[kKmM]?)\s+tokens?\s*\(([0-9]+(?:\.[0-9]+)?)%\)")
        .expect("Invalid context category regex")
});

/// Parser for the context usage block printed by the hosted CLI.
pub struct ContextReportParser;

impl ContextReportParser {
    /// Parse a context usage block.
    ///
    /// Returns `None` when the model/token summary anchor is missing.
    /// Categories and sub-tables accumulate in source order; the order is
    /// load-bearing downstream (grid allocation corrects rounding drift
    /// into the last category).
    pub fn parse(text: &str) -> Option<ContextReport> {
        let clean = strip_ansi(text);

        let caps = match SUMMARY_RE.captures(&clean) {
            Some(caps) => caps,
            None => {
                debug!(target: "termchat::context", "No model/token summary line, dropping block");
                return None;
            }
        };
        let model = caps[1].to_string();
        let used_tokens = parse_token_count(&caps[2]).ok()?;
        let max_tokens = parse_token_count(&caps[3]).ok()?;
        let percentage: f64 = caps[4].parse().ok()?;

        let mut categories = Vec::new();
        let mut sub_tables = Vec::new();
        // Last plain line seen, candidate title for the next table.
        let mut pending_title: Option<String> = None;
        let mut open_table: Option<SubTable> = None;

        for line in clean.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                if let Some(table) = open_table.take() {
                    sub_tables.push(table);
                }
                pending_title = None;
                continue;
            }

            if SUMMARY_RE.is_match(line) {
                continue;
            }

            if let Some(cat) = CATEGORY_RE.captures(line) {
                if let Some(table) = open_table.take() {
                    sub_tables.push(table);
                }
                match parse_token_count(&cat[2]) {
                    Ok(tokens) => {
                        trace!(target: "termchat::context", "Category line: {}", &cat[1]);
                        categories.push(ContextCategory {
                            name: cat[1].trim().to_string(),
                            tokens,
                            percentage: cat[3].parse().unwrap_or(0.0),
                        });
                    }
                    Err(e) => {
                        debug!(target: "termchat::context", "Skipping category line: {}", e);
                    }
                }
                continue;
            }

            if trimmed.starts_with('|') {
                let cells = split_table_row(trimmed);
                if is_separator_row(&cells) {
                    continue;
                }
                match open_table.as_mut() {
                    Some(table) => table.rows.push(cells),
                    None => {
                        open_table = Some(SubTable {
                            title: pending_title.take().unwrap_or_default(),
                            headers: cells,
                            rows: Vec::new(),
                        });
                    }
                }
                continue;
            }

            // Any other line is a candidate title for a following table.
            if let Some(table) = open_table.take() {
                sub_tables.push(table);
            }
            pending_title = Some(trimmed.trim_end_matches(':').trim().to_string());
        }
        if let Some(table) = open_table.take() {
            sub_tables.push(table);
        }

        Some(ContextReport {
            model,
            used_tokens,
            max_tokens,
            percentage,
            categories,
            sub_tables,
        })
    }
}

/// Parse a formatted token count (`902`, `1,234`, `48.2k`, `2.5m`) into a
/// whole token count.
fn parse_token_count(s: &str) -> Result<u64> {
    let s = s.trim().replace(',', "");
    let (digits, multiplier) = match s.chars().last() {
        Some('k') | Some('K') => (&s[..s.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&s[..s.len() - 1], 1_000_000.0),
        _ => (s.as_str(), 1.0),
    };
    let value: f64 = digits
        .parse()
        .map_err(|_| TermchatError::ParseError(format!("invalid token count: {s}")))?;
    Ok((value * multiplier).round() as u64)
}

/// Split a `| a | b |` row into trimmed cell strings.
fn split_table_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// A markdown alignment rule like `|-----|:---:|`.
fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            !cell.is_empty() && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONTEXT_BLOCK: &str = r#"
claude-opus-4-6 · 48.2k/200k tokens (24%)

System prompt: 3.2k tokens (1.6%)
System tools: 11.1k tokens (5.6%)
Memory files: 1.4k tokens (0.7%)
Messages: 32.5k tokens (16.3%)

MCP tools
| Name | Tokens |
|------|--------|
| bash | 1.2k |
| web_search | 640 |

Memory files:
| Path | Tokens |
|------|--------|
| ~/.config/AGENTS.md | 811 |
"#;

    #[test]
    fn parses_summary_anchor() {
        let report = ContextReportParser::parse(FULL_CONTEXT_BLOCK).unwrap();
        assert_eq!(report.model, "claude-opus-4-6");
        assert_eq!(report.used_tokens, 48_200);
        assert_eq!(report.max_tokens, 200_000);
        assert_eq!(report.percentage, 24.0);
    }

    #[test]
    fn categories_keep_source_order() {
        let report = ContextReportParser::parse(FULL_CONTEXT_BLOCK).unwrap();
        let names: Vec<&str> = report.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["System prompt", "System tools", "Memory files", "Messages"]
        );
        assert_eq!(report.categories[0].tokens, 3_200);
        assert_eq!(report.categories[3].percentage, 16.3);
    }

    #[test]
    fn parses_sub_tables() {
        let report = ContextReportParser::parse(FULL_CONTEXT_BLOCK).unwrap();
        assert_eq!(report.sub_tables.len(), 2);

        let mcp = &report.sub_tables[0];
        assert_eq!(mcp.title, "MCP tools");
        assert_eq!(mcp.headers, vec!["Name", "Tokens"]);
        assert_eq!(mcp.rows.len(), 2);
        assert_eq!(mcp.rows[1], vec!["web_search", "640"]);

        let memory = &report.sub_tables[1];
        assert_eq!(memory.title, "Memory files");
        assert_eq!(memory.rows[0], vec!["~/.config/AGENTS.md", "811"]);
    }

    #[test]
    fn missing_summary_fails_whole_parse() {
        let text = "System prompt: 3.2k tokens (1.6%)\nMessages: 1k tokens (0.5%)";
        assert!(ContextReportParser::parse(text).is_none());
    }

    #[test]
    fn summary_alone_yields_empty_breakdown() {
        let report = ContextReportParser::parse("claude-haiku · 10k/200k tokens (5%)").unwrap();
        assert!(report.categories.is_empty());
        assert!(report.sub_tables.is_empty());
    }

    #[test]
    fn colored_block_parses_after_sanitizing() {
        let text = "\x1b[1mclaude-opus\x1b[0m · \x1b[33m150k\x1b[0m/200k tokens (75%)";
        let report = ContextReportParser::parse(text).unwrap();
        assert_eq!(report.used_tokens, 150_000);
    }

    #[test]
    fn token_count_suffixes() {
        assert_eq!(parse_token_count("902").unwrap(), 902);
        assert_eq!(parse_token_count("1,234").unwrap(), 1_234);
        assert_eq!(parse_token_count("48.2k").unwrap(), 48_200);
        assert_eq!(parse_token_count("2.5m").unwrap(), 2_500_000);
        assert!(parse_token_count("lots").is_err());
    }

    #[test]
    fn separator_rows_are_skipped() {
        assert!(is_separator_row(&split_table_row("|---|:---:|")));
        assert!(!is_separator_row(&split_table_row("| a | b |")));
    }
}

//! Per-line classification of the live transcript stream.
//!
//! The hosted CLI interleaves plain shell output with single-line JSON
//! records describing tool calls, reasoning steps, assistant messages and
//! errors. Classification is two-tier: try to decode the line as one
//! structured record and dispatch on its `type` field in a fixed priority
//! order; otherwise tag the raw text with its stream origin. Each line is
//! classified independently — a record that spans multiple physical lines
//! fails the decode and degrades to raw text for those lines only.

use serde_json::{Map, Value};
use termchat_types::{ClassifiedLine, StreamOrigin};
use tracing::trace;

/// Bound on rendering a structured record that has no usable content field.
const STRUCTURED_PREVIEW_LIMIT: usize = 200;

/// One decoded structured record, already reduced to display form.
/// Priority order over `type` substrings is fixed: tool, reasoning,
/// assistant, error. Anything else falls back to raw classification.
enum StructuredKind {
    Tool,
    Reasoning,
    Assistant,
    Error,
}

static KIND_RULES: &[(&[&str], StructuredKind)] = &[
    (&["command", "tool"], StructuredKind::Tool),
    (&["reasoning"], StructuredKind::Reasoning),
    (&["message", "assistant"], StructuredKind::Assistant),
    (&["error"], StructuredKind::Error),
];

/// Stateless per-line transcript classifier.
pub struct LineClassifier;

impl LineClassifier {
    /// Classify one raw transcript line.
    ///
    /// Blank lines produce no output. A structured record yields exactly
    /// one entry; raw text yields one entry per non-blank sub-line (the
    /// PTY occasionally delivers several physical lines in one chunk),
    /// each tagged with the origin's label and color, in order.
    pub fn classify(line: &str, origin: StreamOrigin) -> Vec<ClassifiedLine> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if let Some(classified) = classify_structured(trimmed) {
            return vec![classified];
        }

        line.split('\n')
            .map(str::trim)
            .filter(|sub| !sub.is_empty())
            .map(|sub| ClassifiedLine::from_stream(origin, sub))
            .collect()
    }
}

/// Attempt to decode the line as a single structured record.
///
/// Returns `None` for non-JSON lines, non-object records, records without a
/// `type` field, and unrecognized type names — all of which fall back to
/// raw-stream classification.
fn classify_structured(line: &str) -> Option<ClassifiedLine> {
    let record: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            trace!(target: "termchat::classify", "Not a structured record: {}", e);
            return None;
        }
    };
    let obj = record.as_object()?;
    let kind_name = obj.get("type").and_then(Value::as_str)?;

    let kind = KIND_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| kind_name.contains(n)))
        .map(|(_, kind)| kind)?;

    let line = match kind {
        StructuredKind::Tool => {
            let text = string_field(obj, &["item", "payload"])
                .unwrap_or_else(|| truncate_preview(&record.to_string()));
            ClassifiedLine::new("[tool]", text, "tool")
        }
        StructuredKind::Reasoning => {
            let text =
                string_field(obj, &["summary", "text"]).unwrap_or_else(|| record.to_string());
            ClassifiedLine::new("[reasoning]", text, "reasoning")
        }
        StructuredKind::Assistant => {
            let text = string_field(obj, &["text", "content"]).unwrap_or_default();
            ClassifiedLine::new("[assistant]", text, "assistant")
        }
        StructuredKind::Error => {
            let text = string_field(obj, &["message"]).unwrap_or_else(|| record.to_string());
            ClassifiedLine::new("[error]", text, "error")
        }
    };
    Some(line)
}

/// First present string field among `names`.
fn string_field(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_str))
        .map(str::to_string)
}

/// Bound a record preview to [`STRUCTURED_PREVIEW_LIMIT`] characters.
fn truncate_preview(s: &str) -> String {
    if s.chars().count() <= STRUCTURED_PREVIEW_LIMIT {
        s.to_string()
    } else {
        let head: String = s.chars().take(STRUCTURED_PREVIEW_LIMIT - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_produces_nothing() {
        assert!(LineClassifier::classify("", StreamOrigin::Stdout).is_empty());
        assert!(LineClassifier::classify("   \t ", StreamOrigin::Stderr).is_empty());
    }

    #[test]
    fn reasoning_record_uses_summary() {
        let lines = LineClassifier::classify(
            r#"{"type":"reasoning_summary","summary":"thinking..."}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "[reasoning]");
        assert_eq!(lines[0].text, "thinking...");
        assert_eq!(lines[0].color_key, "reasoning");
    }

    #[test]
    fn plain_text_keeps_stream_tag_and_content() {
        let lines = LineClassifier::classify("building project", StreamOrigin::Stdout);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "[stdout]");
        assert_eq!(lines[0].text, "building project");
    }

    #[test]
    fn tool_record_prefers_item_field() {
        let lines = LineClassifier::classify(
            r#"{"type":"tool_call","item":"Bash(cargo check)"}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(lines[0].label, "[tool]");
        assert_eq!(lines[0].text, "Bash(cargo check)");
    }

    #[test]
    fn command_record_classifies_as_tool() {
        let lines = LineClassifier::classify(
            r#"{"type":"command_start","payload":"ls -la"}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(lines[0].label, "[tool]");
        assert_eq!(lines[0].text, "ls -la");
    }

    #[test]
    fn tool_record_without_content_is_bounded() {
        let filler = "x".repeat(400);
        let line = format!(r#"{{"type":"tool_call","args":"{filler}"}}"#);
        let lines = LineClassifier::classify(&line, StreamOrigin::Stdout);
        assert_eq!(lines[0].label, "[tool]");
        assert_eq!(lines[0].text.chars().count(), STRUCTURED_PREVIEW_LIMIT);
        assert!(lines[0].text.ends_with("..."));
    }

    #[test]
    fn assistant_record_uses_text_else_empty() {
        let lines = LineClassifier::classify(
            r#"{"type":"assistant_message","text":"Done."}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(lines[0].label, "[assistant]");
        assert_eq!(lines[0].text, "Done.");

        let empty = LineClassifier::classify(
            r#"{"type":"message_delta","tokens":12}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(empty[0].label, "[assistant]");
        assert_eq!(empty[0].text, "");
    }

    #[test]
    fn error_record_uses_message() {
        let lines = LineClassifier::classify(
            r#"{"type":"error","message":"rate limited"}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(lines[0].label, "[error]");
        assert_eq!(lines[0].text, "rate limited");
        assert_eq!(lines[0].color_key, "error");
    }

    #[test]
    fn unrecognized_record_falls_back_to_raw() {
        let line = r#"{"type":"usage","input":120}"#;
        let lines = LineClassifier::classify(line, StreamOrigin::Stdout);
        assert_eq!(lines[0].label, "[stdout]");
        assert_eq!(lines[0].text, line);
    }

    #[test]
    fn malformed_json_falls_back_to_raw() {
        let lines = LineClassifier::classify(r#"{"type":"tool","#, StreamOrigin::Stderr);
        assert_eq!(lines[0].label, "[stderr]");
    }

    #[test]
    fn non_object_json_falls_back_to_raw() {
        let lines = LineClassifier::classify("[1, 2, 3]", StreamOrigin::Stdout);
        assert_eq!(lines[0].label, "[stdout]");
        assert_eq!(lines[0].text, "[1, 2, 3]");
    }

    #[test]
    fn raw_text_splits_sub_lines_in_order() {
        let lines =
            LineClassifier::classify("first\n\n  second  \nthird", StreamOrigin::Command);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(lines.iter().all(|l| l.label == "[command]"));
    }

    #[test]
    fn stream_origin_drives_label_and_color() {
        let lines = LineClassifier::classify("panic!", StreamOrigin::Stderr);
        assert_eq!(lines[0].label, "[stderr]");
        assert_eq!(lines[0].color_key, "stderr");
    }

    #[test]
    fn tool_wins_over_error_in_priority_order() {
        // "tool_error" contains both substrings; the tool rule comes first.
        let lines = LineClassifier::classify(
            r#"{"type":"tool_error","item":"Bash failed"}"#,
            StreamOrigin::Stdout,
        );
        assert_eq!(lines[0].label, "[tool]");
    }
}

//! ANSI color stripping for captured CLI output.
//!
//! The hosted CLI colors its reports, so escape sequences sit directly
//! against the numeric tokens the report parsers match on (e.g. a colored
//! dollar amount). Every report parser sanitizes before any structural
//! matching.

use once_cell::sync::Lazy;
use regex::Regex;

/// SGR sequences: `ESC [ <params> m`.
static SGR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid SGR regex"));

/// Strip ANSI color sequences from text.
///
/// Everything that is not an SGR sequence passes through unchanged,
/// including newline structure. Never fails; idempotent.
pub fn strip_ansi(raw: &str) -> String {
    SGR_REGEX.replace_all(raw, "").to_string()
}

//! Parser for the CLI's release notes output.

use crate::sanitize::strip_ansi;
use once_cell::sync::Lazy;
use regex::Regex;
use termchat_types::ReleaseNotesEntry;
use tracing::trace;

/// Entry header: `Version 2.4.1:`.
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Version\s+(\S+):\s*$").expect("Invalid version header regex"));

/// Bullet glyphs the hosted CLI family prints.
const BULLET_GLYPHS: [char; 3] = ['•', '-', '*'];

/// Parser for release notes blocks.
pub struct ReleaseNotesParser;

impl ReleaseNotesParser {
    /// Parse a release notes block into ordered version entries.
    ///
    /// A `Version <X>:` line opens an entry; bullet lines under it become
    /// its changes. An entry flushes only if it accumulated at least one
    /// change — a bare version header is not a valid entry. Anything that
    /// is neither a header nor a bullet is ignored. There is no error
    /// state: unrecognizable input yields an empty sequence.
    pub fn parse(text: &str) -> Vec<ReleaseNotesEntry> {
        let clean = strip_ansi(text);
        let mut entries = Vec::new();
        let mut current: Option<ReleaseNotesEntry> = None;

        for line in clean.lines() {
            let trimmed = line.trim();

            if let Some(caps) = VERSION_RE.captures(trimmed) {
                flush(&mut entries, current.take());
                trace!(target: "termchat::notes", "Version header: {}", &caps[1]);
                current = Some(ReleaseNotesEntry {
                    version: caps[1].to_string(),
                    changes: Vec::new(),
                });
                continue;
            }

            if let Some(change) = strip_bullet(trimmed) {
                if let Some(entry) = current.as_mut() {
                    entry.changes.push(change.to_string());
                }
            }
        }
        flush(&mut entries, current.take());

        entries
    }
}

fn flush(entries: &mut Vec<ReleaseNotesEntry>, entry: Option<ReleaseNotesEntry>) {
    if let Some(entry) = entry {
        if !entry.changes.is_empty() {
            entries.push(entry);
        }
    }
}

/// Strip a leading bullet glyph; `None` when the line is not a bullet.
fn strip_bullet(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if BULLET_GLYPHS.contains(&first) {
        Some(line[first.len_utf8()..].trim())
    } else {
        None
    }
}

//! Added-line scanning for Android string resources.
//!
//! A translatable entry in `strings.xml` that references another string
//! resource (`@string/...`) breaks the translation tooling. Such entries must
//! carry `translatable="false"`. Only lines added by the PR are checked.

use crate::finding::{Finding, FindingKind};

/// Token marking a reference to another string resource.
pub const STRING_RESOURCE_TOKEN: &str = "@string/";

/// Attribute that exempts an entry from translation.
pub const UNTRANSLATABLE_ATTRIBUTE: &str = "translatable=\"false\"";

/// Whether a line references another string resource.
pub fn references_string_resource(line: &str) -> bool {
    line.contains(STRING_RESOURCE_TOKEN)
}

/// Whether a line is exempted from translation.
pub fn is_marked_untranslatable(line: &str) -> bool {
    line.contains(UNTRANSLATABLE_ATTRIBUTE)
}

/// Whether `text` is a unified diff rather than bare added text.
///
/// A unified diff with any change carries at least one hunk header.
pub fn is_unified_diff(text: &str) -> bool {
    text.lines().any(|line| hunk_lengths(line).is_some())
}

/// Extract the added text from a unified diff.
///
/// Only lines inside a hunk count, so `---` / `+++` file headers are skipped
/// while an added line whose content starts with `++` is kept. Lines are
/// joined with `\n` in diff order.
pub fn added_lines(unified_diff: &str) -> String {
    let mut added = Vec::new();
    let (mut old_left, mut new_left) = (0usize, 0usize);

    for line in unified_diff.lines() {
        if old_left == 0 && new_left == 0 {
            if let Some((old, new)) = hunk_lengths(line) {
                old_left = old;
                new_left = new;
            }
            continue;
        }
        match line.as_bytes().first() {
            Some(b'+') => {
                new_left = new_left.saturating_sub(1);
                added.push(&line[1..]);
            }
            Some(b'-') => old_left = old_left.saturating_sub(1),
            // "\ No newline at end of file"
            Some(b'\\') => {}
            _ => {
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
            }
        }
    }

    added.join("\n")
}

/// Added text of a diff as handed over by a source.
///
/// Unified diffs are reduced with [`added_lines`]; anything else is already
/// added text and passes through.
pub fn added_text(diff: &str) -> String {
    if is_unified_diff(diff) {
        added_lines(diff)
    } else {
        diff.to_string()
    }
}

/// Old and new line counts of a `@@ -l[,s] +l[,s] @@` hunk header.
fn hunk_lengths(line: &str) -> Option<(usize, usize)> {
    let mut ranges = line.strip_prefix("@@ ")?.split_whitespace();
    let old = range_len(ranges.next()?.strip_prefix('-')?)?;
    let new = range_len(ranges.next()?.strip_prefix('+')?)?;
    (ranges.next() == Some("@@")).then_some((old, new))
}

fn range_len(range: &str) -> Option<usize> {
    match range.split_once(',') {
        Some((start, len)) => {
            start.parse::<usize>().ok()?;
            len.parse().ok()
        }
        None => range.parse::<usize>().ok().map(|_| 1),
    }
}

/// Scan the added text of one `strings.xml` diff.
///
/// Returns one warning per offending line, in line order. Duplicate lines
/// yield duplicate findings.
pub fn scan_added_string_resources(added: &str) -> Vec<Finding> {
    added
        .replace('\r', "")
        .split('\n')
        .filter(|line| references_string_resource(line) && !is_marked_untranslatable(line))
        .map(string_reference_finding)
        .collect()
}

fn string_reference_finding(line: &str) -> Finding {
    Finding::warn(
        FindingKind::StringResourceReference,
        format!(
            "This PR adds a translatable entry to `strings.xml` which references another \
             string resource: this usually causes issues with translations. \
             Please make sure to set the `{UNTRANSLATABLE_ATTRIBUTE}` attribute here: `{line}`"
        ),
    )
}

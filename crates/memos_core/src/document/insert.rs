//! Anchor-based line insertion.
//!
//! # Responsibility
//! - Locate the configured anchor line in a note.
//! - Place a new line after the last non-blank line of the anchor's
//!   section, before the next heading or rule.
//!
//! # Invariants
//! - Lines other than the inserted one are preserved byte-for-byte.
//! - A missing anchor is not an error: the line is appended at end of file
//!   and the position is [`ANCHOR_NOT_FOUND`].
//! - Insertion never deduplicates; repeated calls keep appending.

use super::line::split_lines;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Position reported when the anchor was not found.
pub const ANCHOR_NOT_FOUND: i64 = -1;

static SECTION_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#+ |---").expect("valid section boundary regex"));
static BLANK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*$").expect("valid blank line regex"));

/// Result of [`insert_after`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Full note content after the splice.
    pub content: String,
    /// 0-based index of the line the new line was placed after, or
    /// [`ANCHOR_NOT_FOUND`].
    pub position: i64,
}

impl Insertion {
    pub fn anchor_found(&self) -> bool {
        self.position != ANCHOR_NOT_FOUND
    }

    /// 0-based index of the inserted line when the anchor was found.
    pub fn inserted_line_index(&self) -> Option<usize> {
        usize::try_from(self.position).ok().map(|position| position + 1)
    }
}

/// Inserts `new_line` into `file_content` after the section under `anchor`.
pub fn insert_after(anchor: &str, new_line: &str, file_content: &str) -> Insertion {
    let lines = split_lines(file_content);

    let Some(anchor_index) = find_anchor_line(anchor, &lines) else {
        warn!(
            "event=anchor_missing module=insert status=fallback lines={}",
            lines.len()
        );
        return Insertion {
            content: format!("{file_content}\n{new_line}"),
            position: ANCHOR_NOT_FOUND,
        };
    };

    let insert_index = match find_section_boundary(&lines, anchor_index) {
        Some(boundary) => last_content_line(&lines, anchor_index, boundary),
        None => lines.len() - 1,
    };

    let mut spliced = Vec::with_capacity(lines.len() + 1);
    spliced.extend_from_slice(&lines[..=insert_index]);
    spliced.push(new_line);
    spliced.extend_from_slice(&lines[insert_index + 1..]);

    Insertion {
        content: spliced.join("\n"),
        position: insert_index as i64,
    }
}

/// First line containing `anchor`, matched literally.
pub fn find_anchor_line(anchor: &str, lines: &[&str]) -> Option<usize> {
    match Regex::new(&format!(r"\s*{}\s*", regex::escape(anchor))) {
        Ok(pattern) => lines.iter().position(|line| pattern.is_match(line)),
        Err(_) => lines.iter().position(|line| line.contains(anchor)),
    }
}

fn find_section_boundary(lines: &[&str], anchor_index: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(anchor_index + 1)
        .find(|(_, line)| SECTION_BOUNDARY_RE.is_match(line))
        .map(|(index, _)| index)
}

/// Last non-blank line strictly between anchor and boundary, else the anchor.
fn last_content_line(lines: &[&str], anchor_index: usize, boundary: usize) -> usize {
    (anchor_index + 1..boundary)
        .rev()
        .find(|&index| !BLANK_LINE_RE.is_match(lines[index]))
        .unwrap_or(anchor_index)
}

#[cfg(test)]
mod tests {
    use super::{find_anchor_line, insert_after, last_content_line, ANCHOR_NOT_FOUND};

    #[test]
    fn anchor_is_matched_literally() {
        let lines = ["intro", "a.b (x)", "## Log"];
        assert_eq!(find_anchor_line("a.b (x)", &lines), Some(1));
        assert_eq!(find_anchor_line("a*b", &lines), None);
    }

    #[test]
    fn blank_lines_before_boundary_are_skipped() {
        let lines = ["# Journal", "- one", "", "", "## Next"];
        assert_eq!(last_content_line(&lines, 0, 4), 1);
        let empty_section = ["# Journal", "", "## Next"];
        assert_eq!(last_content_line(&empty_section, 0, 2), 0);
    }

    #[test]
    fn inserts_under_anchor_before_next_heading() {
        let inserted = insert_after("# Journal", "- new", "# Journal\n- old\n\n# Other\nx");
        assert_eq!(inserted.content, "# Journal\n- old\n- new\n\n# Other\nx");
        assert_eq!(inserted.position, 1);
        assert_eq!(inserted.inserted_line_index(), Some(2));
    }

    #[test]
    fn horizontal_rule_ends_section() {
        let inserted = insert_after("# Journal", "- new", "# Journal\n---\nfooter");
        assert_eq!(inserted.content, "# Journal\n- new\n---\nfooter");
        assert_eq!(inserted.position, 0);
    }

    #[test]
    fn without_boundary_appends_after_last_line() {
        let inserted = insert_after("# Journal", "- new", "# Journal\n- old\n");
        assert_eq!(inserted.content, "# Journal\n- old\n\n- new");
        assert_eq!(inserted.position, 2);
    }

    #[test]
    fn missing_anchor_appends_at_end() {
        let inserted = insert_after("# Journal", "- new", "plain");
        assert_eq!(inserted.content, "plain\n- new");
        assert_eq!(inserted.position, ANCHOR_NOT_FOUND);
        assert!(!inserted.anchor_found());
        assert_eq!(inserted.inserted_line_index(), None);
    }
}

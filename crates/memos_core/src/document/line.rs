//! Single-line helpers.

use chrono::NaiveDateTime;

/// Inline marker standing in for `\n` inside a stored memo line.
pub const LINE_BREAK_MARKER: &str = "<br>";

const TEMPLATE_TIME: &str = "{TIME}";
const TEMPLATE_CONTENT: &str = "{CONTENT}";
const TASK_PREFIX: &str = "- [ ] ";
const JOURNAL_PREFIX: &str = "- ";

/// Turns multi-line memo text into one storable line.
///
/// `\n` becomes `<br>`; a `<br><br>` pair is split to `<br> <br>` so empty
/// lines survive markdown rendering.
pub fn escape_line_breaks(content: &str) -> String {
    content
        .replace('\n', LINE_BREAK_MARKER)
        .replace("<br><br>", "<br> <br>")
}

/// Render-time inverse of [`escape_line_breaks`].
pub fn restore_line_breaks(content: &str) -> String {
    content.replace("<br> <br>", "\n\n").replace(LINE_BREAK_MARKER, "\n")
}

/// Builds the markdown list line for a new memo.
///
/// `escaped` must already have passed through [`escape_line_breaks`].
/// An empty `template` yields `HH:mm:ss content`.
pub fn format_memo_line(
    escaped: &str,
    is_task: bool,
    at: &NaiveDateTime,
    template: &str,
) -> String {
    let time = at.format("%H:%M:%S").to_string();
    let prefix = if is_task { TASK_PREFIX } else { JOURNAL_PREFIX };
    let body = if template.is_empty() {
        format!("{time} {escaped}")
    } else {
        template
            .replace(TEMPLATE_TIME, &time)
            .replace(TEMPLATE_CONTENT, escaped)
    };
    format!("{prefix}{body}")
}

/// Splits on `\n`; a trailing newline yields a final empty element.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split('\n').collect()
}

/// Number of lines when splitting on `\r?\n`.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

/// Replaces the first `original` inside line `index` with `replacement`.
///
/// Every other byte of `content` is preserved, including `\r\n` endings.
/// Returns `None` when `index` is past the last line.
pub fn replace_in_line(
    content: &str,
    index: usize,
    original: &str,
    replacement: &str,
) -> Option<String> {
    let mut rebuilt = String::with_capacity(content.len() + replacement.len());
    let mut found = false;

    for (current, segment) in content.split('\n').enumerate() {
        if current > 0 {
            rebuilt.push('\n');
        }
        if current != index {
            rebuilt.push_str(segment);
            continue;
        }

        found = true;
        let (body, ending) = match segment.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (segment, ""),
        };
        rebuilt.push_str(&body.replacen(original, replacement, 1));
        rebuilt.push_str(ending);
    }

    found.then_some(rebuilt)
}

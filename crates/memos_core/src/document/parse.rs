//! Daily note -> memo records.
//!
//! A memo line is a markdown list item starting with a clock time:
//! `- 09:30:00 text`, `- [ ] 09:30 text`, `* [x] 09:30:00 text`.
//! Content stays escaped (`<br>`); restoring line breaks is a render concern.

use crate::model::memo::{Memo, MemoType};
use crate::model::memo_id::build_memo_id;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static MEMO_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*]\s+(?:\[(.)\]\s+)?(\d{1,2}):(\d{2})(?::(\d{2}))?\s+(.*)$")
        .expect("valid memo line regex")
});

/// Parses every memo line of one daily note.
///
/// Ids use the 0-based line index, matching what the writer produces.
/// Lines with an out-of-range clock are skipped.
pub fn parse_daily_note(content: &str, date: NaiveDate, path: &str) -> Vec<Memo> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| parse_memo_line(line.trim_end_matches('\r'), date, index, path))
        .collect()
}

fn parse_memo_line(line: &str, date: NaiveDate, index: usize, path: &str) -> Option<Memo> {
    let caps = MEMO_LINE_RE.captures(line)?;
    let hour = caps.get(2)?.as_str().parse().ok()?;
    let minute = caps.get(3)?.as_str().parse().ok()?;
    let second = caps
        .get(4)
        .map(|m| m.as_str().parse())
        .transpose()
        .ok()?
        .unwrap_or(0);
    let at = date.and_time(NaiveTime::from_hms_opt(hour, minute, second)?);

    let memo_type = match caps.get(1).map(|m| m.as_str()) {
        Some("x") | Some("X") => MemoType::TaskDone,
        Some(_) => MemoType::TaskTodo,
        None => MemoType::Journal,
    };
    let content = caps.get(5).map(|m| m.as_str()).unwrap_or_default();

    Some(Memo::new(
        build_memo_id(&at, index),
        content,
        memo_type,
        &at,
        path,
    ))
}

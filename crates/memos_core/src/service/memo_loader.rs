//! Builds the memo collection from every daily note in the host.

use super::MemoServiceResult;
use crate::document::parse::parse_daily_note;
use crate::host::{DailyNoteIndex, FileStore};
use crate::model::memo::Memo;
use chrono::NaiveDate;
use log::{debug, warn};

/// Reads and parses all daily notes, newest memo first.
///
/// Notes that fail to read are skipped with a warning so one bad file does
/// not empty the feed.
///
/// # Errors
/// - `Host` when the daily-note index itself cannot be listed.
pub fn load_memos<F, D>(files: &F, daily_notes: &D) -> MemoServiceResult<Vec<Memo>>
where
    F: FileStore + ?Sized,
    D: DailyNoteIndex + ?Sized,
{
    let index = daily_notes.list_all()?;
    let mut memos = Vec::new();

    for (key, file) in &index {
        let Some(date) = key
            .strip_prefix("day-")
            .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        else {
            debug!("event=memo_load module=loader status=skip_key");
            continue;
        };
        match files.read_file(file) {
            Ok(content) => memos.extend(parse_daily_note(&content, date, &file.path)),
            Err(_) => warn!("event=memo_load module=loader status=read_failed date={date}"),
        }
    }

    // Same-second memos fall back to later line first.
    memos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.len().cmp(&a.id.len()).then_with(|| b.id.cmp(&a.id)))
    });
    Ok(memos)
}

//! Memo creation into daily notes.
//!
//! # Responsibility
//! - Format a new memo line and insert it under the configured anchor of
//!   the daily note for the memo's date.
//! - Derive the synthetic id from the date and landing line.
//!
//! # Invariants
//! - The daily note is created through the host when missing.
//! - The writer never touches the in-memory store; callers push the
//!   returned memo themselves.

use super::MemoServiceResult;
use crate::config::MemoSettings;
use crate::document::insert::{insert_after, Insertion};
use crate::document::line::{escape_line_breaks, format_memo_line, line_count};
use crate::host::{DailyNoteIndex, FileHandle, FileStore};
use crate::model::memo::{Memo, MemoType};
use crate::model::memo_id::build_memo_id;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::info;

/// Writes new memos into daily notes.
pub struct MemoWriter<'h, F: FileStore, D: DailyNoteIndex> {
    files: &'h F,
    daily_notes: &'h D,
    settings: &'h MemoSettings,
}

impl<'h, F: FileStore, D: DailyNoteIndex> MemoWriter<'h, F, D> {
    pub fn new(files: &'h F, daily_notes: &'h D, settings: &'h MemoSettings) -> Self {
        Self {
            files,
            daily_notes,
            settings,
        }
    }

    /// Creates one memo at `when` (default: now, local time).
    ///
    /// The returned memo keeps `content` unescaped; the stored line holds
    /// the `<br>`-escaped form.
    ///
    /// # Errors
    /// - `Host` when the daily note cannot be listed, created, read or written.
    pub fn create(
        &self,
        content: &str,
        is_task: bool,
        when: Option<NaiveDateTime>,
    ) -> MemoServiceResult<Memo> {
        let at = when.unwrap_or_else(|| Local::now().naive_local());
        let escaped = escape_line_breaks(content);
        let line = format_memo_line(
            &escaped,
            is_task,
            &at,
            &self.settings.default_memo_composition,
        );

        let file = self.daily_note_for(at.date())?;
        let current = self.files.read_file(&file)?;
        let insertion = insert_after(&self.settings.insert_after, &line, &current);
        self.files.write_file(&file, &insertion.content)?;

        let line_number = memo_line_number(&insertion);
        let memo_type = if is_task {
            MemoType::TaskTodo
        } else {
            MemoType::Journal
        };
        info!(
            "event=memo_create module=writer status=ok type={} line={} anchored={}",
            memo_type.as_str(),
            line_number,
            insertion.anchor_found()
        );

        Ok(Memo::new(
            build_memo_id(&at, line_number),
            content,
            memo_type,
            &at,
            file.path,
        ))
    }

    fn daily_note_for(&self, date: NaiveDate) -> MemoServiceResult<FileHandle> {
        let index = self.daily_notes.list_all()?;
        if let Some(file) = self.daily_notes.get_for_date(date, &index) {
            return Ok(file);
        }
        info!("event=daily_note_missing module=writer status=create");
        Ok(self.daily_notes.create_for_date(date)?)
    }
}

/// Line number encoded into a new memo's id.
///
/// Anchored inserts use `position + 1`, the index of the inserted line.
/// End-of-file fallbacks use the new line count plus one.
pub fn memo_line_number(insertion: &Insertion) -> usize {
    insertion
        .inserted_line_index()
        .unwrap_or_else(|| line_count(&insertion.content) + 1)
}

#[cfg(test)]
mod tests {
    use super::memo_line_number;
    use crate::document::insert::Insertion;

    #[test]
    fn anchored_insert_reports_inserted_index() {
        let insertion = Insertion {
            content: "a\nb\nc".to_string(),
            position: 1,
        };
        assert_eq!(memo_line_number(&insertion), 2);
    }

    #[test]
    fn fallback_uses_line_count_plus_one() {
        let insertion = Insertion {
            content: "a\nb\nc".to_string(),
            position: -1,
        };
        assert_eq!(memo_line_number(&insertion), 4);
    }
}

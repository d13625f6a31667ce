//! In-place memo edits.
//!
//! # Responsibility
//! - Map a memo id back to its note and line.
//! - Substitute the edited text inside that single line.
//!
//! # Invariants
//! - Only the addressed line changes; all other bytes are preserved.
//! - The id is returned unchanged; line positions are assumed stable.
//! - New text starting with a `YYYYMMDDHHmmss` stamp redirects the lookup
//!   to that date's note (see [`content_date_override`]).

use super::{MemoServiceError, MemoServiceResult};
use crate::document::line::{escape_line_breaks, replace_in_line};
use crate::host::{DailyNoteIndex, FileHandle, FileStore};
use crate::model::memo::{format_memo_timestamp, Memo, MemoType};
use crate::model::memo_id::{content_date_override, parse_memo_id};
use chrono::{Local, NaiveDate};
use log::info;

const HAS_ID_SUFFIX_LEN: usize = 6;

/// Edits memos already stored in notes.
pub struct MemoMutator<'h, F: FileStore, D: DailyNoteIndex> {
    files: &'h F,
    daily_notes: &'h D,
}

impl<'h, F: FileStore, D: DailyNoteIndex> MemoMutator<'h, F, D> {
    pub fn new(files: &'h F, daily_notes: &'h D) -> Self {
        Self { files, daily_notes }
    }

    /// Replaces `original_text` with `new_text` on the memo's line.
    ///
    /// `path`, when given, names the owning note directly; otherwise the note
    /// is the daily note of the id's (or overriding content's) date.
    ///
    /// # Errors
    /// - `InvalidMemoId` for ids that do not decode.
    /// - `NotFound` when no note resolves or the line index is past the end.
    /// - `Host` for read/write failures.
    pub fn update(
        &self,
        id: &str,
        original_text: &str,
        new_text: &str,
        memo_type: Option<MemoType>,
        path: Option<&str>,
    ) -> MemoServiceResult<Memo> {
        let parts = parse_memo_id(id)?;
        let moved_to = content_date_override(new_text);
        if moved_to.is_some() {
            info!("event=memo_update module=mutator status=date_override");
        }
        let changed_at = moved_to.unwrap_or(parts.stamp);

        let file = self.owning_note(changed_at.date(), path)?;
        let current = self.files.read_file(&file)?;
        let escaped = escape_line_breaks(new_text);
        let updated =
            replace_in_line(&current, parts.line, original_text, &escaped).ok_or_else(|| {
                MemoServiceError::NotFound(format!("line {} in `{}`", parts.line, file.path))
            })?;
        self.files.write_file(&file, &updated)?;
        info!(
            "event=memo_update module=mutator status=ok line={}",
            parts.line
        );

        Ok(Memo {
            id: id.to_string(),
            content: escaped,
            memo_type: memo_type.unwrap_or_default(),
            created_at: format_memo_timestamp(&changed_at),
            updated_at: format_memo_timestamp(&Local::now().naive_local()),
            deleted_at: String::new(),
            path: file.path,
            has_id: id_suffix(id),
            link_id: String::new(),
        })
    }

    fn owning_note(&self, date: NaiveDate, path: Option<&str>) -> MemoServiceResult<FileHandle> {
        let explicit = path.map(str::trim).filter(|path| !path.is_empty());
        let resolved = match explicit {
            Some(path) => self.files.resolve_link_path(path, ""),
            None => {
                let index = self.daily_notes.list_all()?;
                self.daily_notes.get_for_date(date, &index)
            }
        };
        resolved.ok_or_else(|| {
            MemoServiceError::NotFound(match explicit {
                Some(path) => format!("note `{path}`"),
                None => format!("daily note for {}", date.format("%Y-%m-%d")),
            })
        })
    }
}

fn id_suffix(id: &str) -> String {
    let start = id.len().saturating_sub(HAS_ID_SUFFIX_LEN);
    id.get(start..).unwrap_or(id).to_string()
}

#[cfg(test)]
mod tests {
    use super::id_suffix;

    #[test]
    fn id_suffix_takes_last_six_characters() {
        assert_eq!(id_suffix("202401020304057"), "304057");
        assert_eq!(id_suffix("123"), "123");
    }
}

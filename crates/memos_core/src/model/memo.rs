//! Memo record and timestamp helpers.
//!
//! # Responsibility
//! - Define the memo shape exchanged with hosts and remote stores.
//! - Convert between `NaiveDateTime` and the `YYYY/MM/DD HH:mm:ss` wire form.
//!
//! # Invariants
//! - `created_at` is written once by the writer; `updated_at` moves on edits.
//! - `deleted_at` is empty for live memos.

use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Wire format for `created_at` / `updated_at` / `deleted_at`.
pub const MEMO_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Content marker identifying a comment-memo.
pub const COMMENT_MARKER: &str = "comment:";

/// Memo category. Drives rendering and the done-task visibility switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoType {
    /// Plain journal line.
    #[default]
    #[serde(rename = "JOURNAL")]
    Journal,
    /// Open checkbox line.
    #[serde(rename = "TASK-TODO")]
    TaskTodo,
    /// Checked checkbox line.
    #[serde(rename = "TASK-DONE")]
    TaskDone,
}

impl MemoType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "JOURNAL",
            Self::TaskTodo => "TASK-TODO",
            Self::TaskDone => "TASK-DONE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "JOURNAL" => Some(Self::Journal),
            "TASK-TODO" => Some(Self::TaskTodo),
            "TASK-DONE" => Some(Self::TaskDone),
            _ => None,
        }
    }

    pub fn is_task(self) -> bool {
        !matches!(self, Self::Journal)
    }
}

/// One user-authored line inside a daily note.
///
/// Serialized with camelCase names (`memoType`, `createdAt`, ...) to match
/// the host and remote store payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Synthetic `<YYYYMMDDHHmmss><line>` id, see [`crate::model::memo_id`].
    pub id: String,
    /// Raw body with line breaks escaped as `<br>`.
    pub content: String,
    pub memo_type: MemoType,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: String,
    /// Path of the note owning this memo's line.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub has_id: String,
    #[serde(default)]
    pub link_id: String,
}

impl Memo {
    /// Creates a live memo whose created/updated stamps are both `at`.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        memo_type: MemoType,
        at: &NaiveDateTime,
        path: impl Into<String>,
    ) -> Self {
        let stamp = format_memo_timestamp(at);
        Self {
            id: id.into(),
            content: content.into(),
            memo_type,
            created_at: stamp.clone(),
            updated_at: stamp,
            deleted_at: String::new(),
            path: path.into(),
            has_id: String::new(),
            link_id: String::new(),
        }
    }

    /// Returns whether this memo is a comment on another memo.
    pub fn is_comment(&self) -> bool {
        self.content.contains(COMMENT_MARKER)
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_empty()
    }

    pub fn soft_delete(&mut self, at: &NaiveDateTime) {
        self.deleted_at = format_memo_timestamp(at);
    }

    pub fn restore(&mut self) {
        self.deleted_at.clear();
    }

    /// `created_at` as local epoch milliseconds, `None` when unparsable.
    pub fn created_at_epoch_ms(&self) -> Option<i64> {
        parse_memo_timestamp(&self.created_at).map(|at| local_epoch_ms(&at))
    }
}

pub fn format_memo_timestamp(at: &NaiveDateTime) -> String {
    at.format(MEMO_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_memo_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), MEMO_TIMESTAMP_FORMAT).ok()
}

/// Interprets a wall-clock time in the local zone.
///
/// Times skipped by a DST transition fall back to UTC interpretation.
pub fn local_epoch_ms(at: &NaiveDateTime) -> i64 {
    match Local.from_local_datetime(at).earliest() {
        Some(local) => local.timestamp_millis(),
        None => at.and_utc().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_memo_timestamp, parse_memo_timestamp, Memo, MemoType};
    use chrono::NaiveDate;

    #[test]
    fn memo_type_parses_wire_names() {
        assert_eq!(MemoType::parse("TASK-DONE"), Some(MemoType::TaskDone));
        assert_eq!(MemoType::parse("journal"), None);
        assert!(MemoType::TaskTodo.is_task());
        assert!(!MemoType::Journal.is_task());
    }

    #[test]
    fn timestamp_format_roundtrips() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        let text = format_memo_timestamp(&at);
        assert_eq!(text, "2024/03/09 07:05:01");
        assert_eq!(parse_memo_timestamp(&text), Some(at));
    }

    #[test]
    fn soft_delete_sets_and_restore_clears_tombstone() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        let mut memo = Memo::new("202403090705013", "body", MemoType::Journal, &at, "a.md");
        assert!(memo.is_active());
        memo.soft_delete(&at);
        assert!(!memo.is_active());
        memo.restore();
        assert!(memo.is_active());
    }
}

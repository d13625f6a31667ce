//! Synthetic memo id scheme.
//!
//! # Responsibility
//! - Build and parse `<YYYYMMDDHHmmss><line>` ids.
//! - Expose the content-date override used by the mutator.
//!
//! # Invariants
//! - The stamp prefix is always exactly 14 ASCII digits.
//! - The line suffix is the 0-based index of the memo line in its note
//!   at the time the id was built. Edits made outside the plugin that shift
//!   lines silently desynchronize ids; this is accepted.

use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// chrono pattern for the 14-digit id prefix.
pub const MEMO_ID_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const STAMP_LEN: usize = 14;

/// Decoded parts of a synthetic memo id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoIdParts {
    pub stamp: NaiveDateTime,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoIdError {
    /// Id shorter than the stamp prefix plus one line digit.
    TooShort(String),
    /// First 14 characters are not a valid date-time.
    InvalidStamp(String),
    /// Suffix after the stamp is not a line number.
    InvalidLine(String),
}

impl Display for MemoIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort(id) => write!(f, "memo id `{id}` is too short"),
            Self::InvalidStamp(id) => write!(f, "memo id `{id}` has an invalid date prefix"),
            Self::InvalidLine(id) => write!(f, "memo id `{id}` has an invalid line suffix"),
        }
    }
}

impl Error for MemoIdError {}

pub fn build_memo_id(stamp: &NaiveDateTime, line: usize) -> String {
    format!("{}{line}", stamp.format(MEMO_ID_STAMP_FORMAT))
}

pub fn parse_memo_id(id: &str) -> Result<MemoIdParts, MemoIdError> {
    let id = id.trim();
    if id.len() <= STAMP_LEN || !id.is_char_boundary(STAMP_LEN) {
        return Err(MemoIdError::TooShort(id.to_string()));
    }

    let (stamp_text, line_text) = id.split_at(STAMP_LEN);
    let stamp = parse_stamp(stamp_text).ok_or_else(|| MemoIdError::InvalidStamp(id.to_string()))?;
    let line = line_text
        .parse::<usize>()
        .map_err(|_| MemoIdError::InvalidLine(id.to_string()))?;

    Ok(MemoIdParts { stamp, line })
}

/// Returns the date a memo's new text moves it to, if any.
///
/// Text starting with a 14-digit `YYYYMMDDHHmmss` stamp overrides the date
/// embedded in the memo id when the mutator resolves the owning note.
/// Digits that do not form a valid date-time are ignored.
pub fn content_date_override(content: &str) -> Option<NaiveDateTime> {
    let prefix = content.get(..STAMP_LEN)?;
    parse_stamp(prefix)
}

fn parse_stamp(value: &str) -> Option<NaiveDateTime> {
    if value.len() != STAMP_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, MEMO_ID_STAMP_FORMAT).ok()
}

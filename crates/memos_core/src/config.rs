//! Plugin settings consumed by the memo pipeline.
//!
//! # Responsibility
//! - Carry the anchor, line template and feed switches.
//! - Load settings from the host's JSON settings blob.
//!
//! # Invariants
//! - Missing keys fall back to defaults; unknown keys are ignored.
//! - Key names follow the host settings file (`InsertAfter`, ...).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const DEFAULT_INSERT_AFTER: &str = "# Journal";
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MemoSettings {
    /// Anchor line new memos are inserted under.
    pub insert_after: String,
    /// Optional line template with `{TIME}` / `{CONTENT}` placeholders.
    pub default_memo_composition: String,
    /// Hides `TASK-DONE` memos from every feed.
    pub hide_done_tasks: bool,
    pub page_size: usize,
    /// Vault-relative folder holding daily notes.
    pub daily_note_folder: String,
}

impl Default for MemoSettings {
    fn default() -> Self {
        Self {
            insert_after: DEFAULT_INSERT_AFTER.to_string(),
            default_memo_composition: String::new(),
            hide_done_tasks: false,
            page_size: DEFAULT_PAGE_SIZE,
            daily_note_folder: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read settings `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl MemoSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Page size with `0` mapped to the default.
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemoSettings;

    #[test]
    fn missing_keys_use_defaults() {
        let settings = MemoSettings::from_json_str(r#"{"HideDoneTasks": true}"#).unwrap();
        assert!(settings.hide_done_tasks);
        assert_eq!(settings.insert_after, "# Journal");
        assert_eq!(settings.default_memo_composition, "");
        assert_eq!(settings.effective_page_size(), 10);
    }

    #[test]
    fn host_key_names_are_pascal_case() {
        let settings = MemoSettings::from_json_str(
            r###"{
                "InsertAfter": "## Log",
                "DefaultMemoComposition": "{TIME} {CONTENT}",
                "PageSize": 0
            }"###,
        )
        .unwrap();
        assert_eq!(settings.insert_after, "## Log");
        assert_eq!(settings.default_memo_composition, "{TIME} {CONTENT}");
        assert_eq!(settings.effective_page_size(), 10);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(MemoSettings::from_json_str("{").is_err());
    }
}

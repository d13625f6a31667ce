//! Application context and memo reducer.

use crate::config::MemoSettings;
use crate::filter::spec::FilterSpec;
use crate::model::memo::Memo;
use crate::service::feed::{assemble, FeedPage};
use std::collections::{BTreeMap, HashSet};

/// Memo slice of application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoState {
    /// Active memos, newest `created_at` first.
    pub memos: Vec<Memo>,
    pub comment_memos: Vec<Memo>,
    pub tags: Vec<String>,
    /// Number of memos carrying each tag.
    pub tag_counts: BTreeMap<String, usize>,
}

/// State transitions accepted by [`AppContext::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoAction {
    SetMemos(Vec<Memo>),
    SetCommentMemos(Vec<Memo>),
    InsertMemo(Memo),
    InsertCommentMemo(Memo),
    DeleteMemoById(String),
    EditMemo(Memo),
    EditCommentMemo(Memo),
    SetTags {
        tags: Vec<String>,
        tag_counts: BTreeMap<String, usize>,
    },
}

/// Process-wide context threaded through services.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    memo_state: MemoState,
    settings: MemoSettings,
    filter: FilterSpec,
}

impl AppContext {
    pub fn new(settings: MemoSettings) -> Self {
        Self {
            memo_state: MemoState::default(),
            settings,
            filter: FilterSpec::default(),
        }
    }

    pub fn get_state(&self) -> &MemoState {
        &self.memo_state
    }

    pub fn settings(&self) -> &MemoSettings {
        &self.settings
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    /// Page `page` of the memo feed under the active filter and settings.
    pub fn feed(&self, page: usize) -> FeedPage {
        assemble(
            &self.memo_state.memos,
            &self.filter,
            self.settings.hide_done_tasks,
            page,
            self.settings.effective_page_size(),
        )
    }

    pub fn dispatch(&mut self, action: MemoAction) {
        let state = &mut self.memo_state;
        match action {
            MemoAction::SetMemos(memos) => state.memos = memos,
            MemoAction::SetCommentMemos(memos) => state.comment_memos = memos,
            MemoAction::InsertMemo(memo) => insert_newest_first(&mut state.memos, memo),
            MemoAction::InsertCommentMemo(memo) => {
                insert_newest_first(&mut state.comment_memos, memo)
            }
            MemoAction::DeleteMemoById(id) => state.memos.retain(|memo| memo.id != id),
            MemoAction::EditMemo(memo) => replace_by_id(&mut state.memos, memo),
            MemoAction::EditCommentMemo(memo) => replace_by_id(&mut state.comment_memos, memo),
            MemoAction::SetTags { tags, tag_counts } => {
                state.tags = tags;
                state.tag_counts = tag_counts;
            }
        }
    }
}

/// Prepends, drops older copies with the same id, keeps newest first.
fn insert_newest_first(memos: &mut Vec<Memo>, memo: Memo) {
    memos.insert(0, memo);
    let mut seen = HashSet::new();
    memos.retain(|memo| seen.insert(memo.id.clone()));
    memos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn replace_by_id(memos: &mut [Memo], memo: Memo) {
    if let Some(slot) = memos.iter_mut().find(|current| current.id == memo.id) {
        *slot = memo;
    }
}

#[cfg(test)]
mod tests {
    use super::{insert_newest_first, replace_by_id};
    use crate::model::memo::{Memo, MemoType};
    use chrono::NaiveDate;

    fn memo(id: &str, hour: u32, content: &str) -> Memo {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Memo::new(id, content, MemoType::Journal, &at, "2024-01-01.md")
    }

    #[test]
    fn insert_dedupes_by_id_and_orders_newest_first() {
        let mut memos = vec![memo("a", 9, "old a"), memo("b", 8, "b")];
        insert_newest_first(&mut memos, memo("a", 9, "new a"));
        insert_newest_first(&mut memos, memo("c", 10, "c"));

        let ids: Vec<&str> = memos.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(memos[1].content, "new a");
    }

    #[test]
    fn replace_ignores_unknown_ids() {
        let mut memos = vec![memo("a", 9, "a")];
        replace_by_id(&mut memos, memo("zzz", 9, "ghost"));
        assert_eq!(memos.len(), 1);
        assert_eq!(memos[0].content, "a");
    }
}

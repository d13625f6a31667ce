//! Memo use-case facade over the application context.
//!
//! # Responsibility
//! - Sync the context with the remote memo store.
//! - Route create/update results from writer/mutator into the context.
//! - Derive tag statistics and memo cross-references.
//!
//! # Invariants
//! - A failed remote fetch leaves the last known collection untouched.
//! - Hiding removes the memo from the active collection only after the
//!   remote store accepted it.

use super::memo_mutator::MemoMutator;
use super::memo_writer::MemoWriter;
use super::{MemoServiceError, MemoServiceResult};
use crate::extract::tags::extract_tag_names;
use crate::host::{DailyNoteIndex, FileStore, RemoteStore};
use crate::model::memo::{Memo, MemoType, COMMENT_MARKER};
use crate::store::app_context::{AppContext, MemoAction};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Memo service bound to one context and one remote store.
pub struct MemoService<'a, R: RemoteStore> {
    context: &'a mut AppContext,
    remote: &'a R,
}

impl<'a, R: RemoteStore> MemoService<'a, R> {
    pub fn new(context: &'a mut AppContext, remote: &'a R) -> Self {
        Self { context, remote }
    }

    pub fn context(&self) -> &AppContext {
        &*self.context
    }

    /// Replaces memos and comment-memos with the remote store's view.
    ///
    /// # Errors
    /// - `RemoteFailure`; the context keeps its previous collection.
    pub fn fetch_all_memos(&mut self) -> MemoServiceResult<Vec<Memo>> {
        let fetched = self.remote.list_memos().map_err(|err| {
            warn!("event=memo_fetch module=memo_service status=error");
            MemoServiceError::RemoteFailure(err)
        })?;

        info!(
            "event=memo_fetch module=memo_service status=ok memos={} comments={}",
            fetched.memos.len(),
            fetched.comment_memos.len()
        );
        self.context
            .dispatch(MemoAction::SetMemos(fetched.memos.clone()));
        self.context
            .dispatch(MemoAction::SetCommentMemos(fetched.comment_memos));
        Ok(fetched.memos)
    }

    /// Soft-deleted memos, most recently deleted first.
    pub fn fetch_deleted_memos(&self) -> MemoServiceResult<Vec<Memo>> {
        let mut deleted = self
            .remote
            .list_deleted_memos()
            .map_err(MemoServiceError::RemoteFailure)?;
        deleted.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(deleted)
    }

    pub fn push_memo(&mut self, memo: Memo) {
        self.context.dispatch(MemoAction::InsertMemo(memo));
    }

    pub fn push_comment_memo(&mut self, memo: Memo) {
        self.context.dispatch(MemoAction::InsertCommentMemo(memo));
    }

    pub fn get_memo_by_id(&self, id: &str) -> Option<&Memo> {
        self.context.get_state().memos.iter().find(|memo| memo.id == id)
    }

    pub fn get_comment_memo_by_id(&self, id: &str) -> Option<&Memo> {
        self.context
            .get_state()
            .comment_memos
            .iter()
            .find(|memo| memo.id == id)
    }

    /// Soft-deletes remotely, then drops the memo from the active collection.
    pub fn hide_memo(&mut self, id: &str) -> MemoServiceResult<()> {
        self.remote
            .hide(id)
            .map_err(MemoServiceError::RemoteFailure)?;
        self.context
            .dispatch(MemoAction::DeleteMemoById(id.to_string()));
        Ok(())
    }

    pub fn restore_memo(&self, id: &str) -> MemoServiceResult<()> {
        self.remote
            .restore(id)
            .map_err(MemoServiceError::RemoteFailure)
    }

    /// Permanently deletes from the remote store.
    pub fn delete_memo(&self, id: &str) -> MemoServiceResult<()> {
        self.remote
            .delete(id)
            .map_err(MemoServiceError::RemoteFailure)
    }

    pub fn edit_memo(&mut self, memo: Memo) {
        self.context.dispatch(MemoAction::EditMemo(memo));
    }

    pub fn edit_comment_memo(&mut self, memo: Memo) {
        self.context.dispatch(MemoAction::EditCommentMemo(memo));
    }

    /// Writes a new memo to its daily note and pushes it into the context.
    pub fn create_memo<F: FileStore, D: DailyNoteIndex>(
        &mut self,
        writer: &MemoWriter<'_, F, D>,
        content: &str,
        is_task: bool,
        when: Option<NaiveDateTime>,
    ) -> MemoServiceResult<Memo> {
        let memo = writer.create(content, is_task, when)?;
        self.push_memo(memo.clone());
        Ok(memo)
    }

    /// Writes a comment on `target_id` and files it with the comment-memos.
    pub fn create_comment_memo<F: FileStore, D: DailyNoteIndex>(
        &mut self,
        writer: &MemoWriter<'_, F, D>,
        target_id: &str,
        text: &str,
        when: Option<NaiveDateTime>,
    ) -> MemoServiceResult<Memo> {
        let content = format!("{COMMENT_MARKER} {target_id} {text}");
        let mut memo = writer.create(&content, false, when)?;
        memo.link_id = target_id.to_string();
        self.push_comment_memo(memo.clone());
        Ok(memo)
    }

    /// Edits a stored memo line and mirrors the result into the context.
    ///
    /// The memo keeps its current type unless `memo_type` is given.
    pub fn update_memo<F: FileStore, D: DailyNoteIndex>(
        &mut self,
        mutator: &MemoMutator<'_, F, D>,
        id: &str,
        original_text: &str,
        new_text: &str,
        memo_type: Option<MemoType>,
        path: Option<&str>,
    ) -> MemoServiceResult<Memo> {
        let memo_type = memo_type.or_else(|| self.get_memo_by_id(id).map(|memo| memo.memo_type));
        let memo = mutator.update(id, original_text, new_text, memo_type, path)?;
        self.edit_memo(memo.clone());
        Ok(memo)
    }

    /// Recomputes distinct tags and per-tag memo counts.
    pub fn update_tags_state(&mut self) {
        let mut tag_counts = BTreeMap::<String, usize>::new();
        for memo in &self.context.get_state().memos {
            for tag in extract_tag_names(&memo.content) {
                *tag_counts.entry(tag).or_default() += 1;
            }
        }
        let tags = tag_counts.keys().cloned().collect::<BTreeSet<_>>();

        self.context.dispatch(MemoAction::SetTags {
            tags: tags.into_iter().collect(),
            tag_counts,
        });
    }

    /// Memos whose content references `memo_id`.
    pub fn linked_memos(&self, memo_id: &str) -> Vec<Memo> {
        self.context
            .get_state()
            .memos
            .iter()
            .filter(|memo| memo.id != memo_id && memo.content.contains(memo_id))
            .cloned()
            .collect()
    }

    /// Comment-memos attached to `memo_id`.
    pub fn comment_memos_for(&self, memo_id: &str) -> Vec<Memo> {
        let marker = format!("{COMMENT_MARKER} {memo_id}");
        let state = self.context.get_state();
        state
            .memos
            .iter()
            .chain(state.comment_memos.iter())
            .filter(|memo| memo.content.contains(&marker))
            .cloned()
            .collect()
    }
}

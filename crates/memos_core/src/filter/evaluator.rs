//! Per-memo visibility decision.
//!
//! # Invariants
//! - Every clause is evaluated; each may only flip the result to hidden.
//! - A malformed stored query never hides content: [`should_show`] falls
//!   back to showing the memo, except that comment-memos stay hidden.

use super::query::{content_type_matches, parse_clauses, ClauseEvaluator, QueryPredicate};
use super::spec::FilterSpec;
use super::FilterResult;
use crate::extract::tags::extract_tags;
use crate::model::memo::{Memo, MemoType};
use log::warn;

/// Fallible visibility check with a caller-supplied query predicate.
///
/// # Errors
/// - `MalformedFilter` when `spec.query` cannot be parsed.
pub fn try_should_show(
    memo: &Memo,
    spec: &FilterSpec,
    hide_done_tasks: bool,
    predicate: &dyn QueryPredicate,
) -> FilterResult<bool> {
    let mut show = true;

    if hide_done_tasks && memo.memo_type == MemoType::TaskDone {
        show = false;
    }

    if memo.is_comment() {
        show = false;
    }

    if let Some(query) = spec.query.as_ref() {
        let clauses = parse_clauses(&query.querystring)?;
        if !predicate.matches(memo, &clauses) {
            show = false;
        }
    }

    if let Some(tag) = spec.tag_filter() {
        if !extract_tags(&memo.content).contains(tag) {
            show = false;
        }
    }

    if let Some(duration) = spec.active_duration() {
        let within = memo
            .created_at_epoch_ms()
            .is_some_and(|created| duration.contains(created));
        if !within {
            show = false;
        }
    }

    if let Some(content_type) = spec.content_type {
        if !content_type_matches(content_type, &memo.content) {
            show = false;
        }
    }

    if let Some(text) = spec.text_filter() {
        if !memo.content.contains(text) {
            show = false;
        }
    }

    Ok(show)
}

/// Visibility check using the built-in clause evaluator.
pub fn should_show(memo: &Memo, spec: &FilterSpec, hide_done_tasks: bool) -> bool {
    should_show_with(memo, spec, hide_done_tasks, &ClauseEvaluator)
}

pub fn should_show_with(
    memo: &Memo,
    spec: &FilterSpec,
    hide_done_tasks: bool,
    predicate: &dyn QueryPredicate,
) -> bool {
    match try_should_show(memo, spec, hide_done_tasks, predicate) {
        Ok(show) => show,
        Err(_) => {
            warn!(
                "event=filter_eval module=filter status=malformed_query query_id={}",
                spec.query.as_ref().map(|query| query.id.as_str()).unwrap_or("")
            );
            !memo.is_comment()
        }
    }
}

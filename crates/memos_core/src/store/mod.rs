//! Explicit application state.
//!
//! # Responsibility
//! - Hold the memo collection, comment-memos, tag statistics, settings and
//!   the active feed filter in one context object.
//! - Apply state changes only through [`app_context::MemoAction`].
//!
//! # Invariants
//! - One context per process, passed by reference; there is no global.

pub mod app_context;

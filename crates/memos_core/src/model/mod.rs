//! Memo domain model.
//!
//! # Responsibility
//! - Define the canonical memo record shared by writer, mutator and feed.
//! - Own the synthetic id scheme (`<YYYYMMDDHHmmss><line>`).
//!
//! # Invariants
//! - A memo references exactly one line inside one daily note.
//! - Deletion is a soft tombstone (`deleted_at`), never a hard delete here.

pub mod memo;
pub mod memo_id;

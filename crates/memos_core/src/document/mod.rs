//! Line-oriented markdown operations on daily notes.
//!
//! # Responsibility
//! - Format memo lines and escape embedded line breaks.
//! - Splice new lines after a configured anchor ([`insert`]).
//! - Read memo lines back out of a note ([`parse`]).
//!
//! # Invariants
//! - Functions here are pure text transforms; no host IO.
//! - A memo always occupies exactly one physical line.

pub mod insert;
pub mod line;
pub mod parse;

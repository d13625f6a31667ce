//! Feed filtering.
//!
//! # Responsibility
//! - Describe a feed query ([`spec::FilterSpec`]).
//! - Decide per memo whether it is shown ([`evaluator`]).
//! - Evaluate stored JSON clause lists ([`query`]).
//!
//! # Invariants
//! - Clauses only ever hide a memo; no clause re-shows one.
//! - Comment-memos never reach the primary feed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod evaluator;
pub mod query;
pub mod spec;

pub type FilterResult<T> = Result<T, FilterError>;

/// Filter evaluation error.
#[derive(Debug)]
pub enum FilterError {
    /// Stored query string is not a valid clause list.
    MalformedFilter { query: String, message: String },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedFilter { query, message } => {
                write!(f, "malformed stored query `{query}`: {message}")
            }
        }
    }
}

impl Error for FilterError {}

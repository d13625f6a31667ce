//! Tag, link and image extraction over raw memo text.
//!
//! # Responsibility
//! - Hold the regex dispatch table used by classification and filtering.
//! - Expand hierarchical tags into every ancestor prefix.
//! - Split image references into resolved/unresolved internal links and
//!   external URLs.
//!
//! # Invariants
//! - Extraction is pure except for link resolution, which goes through
//!   [`crate::host::FileStore`] and never fails.
//! - Cheap guards may skip scanning but never change results.

pub mod links;
pub mod patterns;
pub mod tags;

//! Memo use-case services.
//!
//! # Responsibility
//! - Orchestrate host IO around the pure document/filter layers.
//! - Keep store mutation separate from the file write path.
//!
//! # Invariants
//! - One logical write is read -> compute -> write on a single file.
//! - Missing target notes surface as `NotFound`; nothing is retried.

use crate::host::HostError;
use crate::model::memo_id::MemoIdError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod feed;
pub mod memo_loader;
pub mod memo_mutator;
pub mod memo_service;
pub mod memo_writer;

pub type MemoServiceResult<T> = Result<T, MemoServiceError>;

/// Service error for memo use-cases.
#[derive(Debug)]
pub enum MemoServiceError {
    /// No note (or no line) resolves for the requested memo.
    NotFound(String),
    InvalidMemoId(MemoIdError),
    /// Host file or daily-note collaborator failure.
    Host(HostError),
    /// Remote memo store failure.
    RemoteFailure(HostError),
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(details) => write!(f, "memo target not found: {details}"),
            Self::InvalidMemoId(err) => write!(f, "{err}"),
            Self::Host(err) => write!(f, "{err}"),
            Self::RemoteFailure(err) => write!(f, "remote store failure: {err}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::InvalidMemoId(err) => Some(err),
            Self::Host(err) => Some(err),
            Self::RemoteFailure(err) => Some(err),
        }
    }
}

impl From<HostError> for MemoServiceError {
    fn from(value: HostError) -> Self {
        Self::Host(value)
    }
}

impl From<MemoIdError> for MemoServiceError {
    fn from(value: MemoIdError) -> Self {
        Self::InvalidMemoId(value)
    }
}

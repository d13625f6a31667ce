//! Core domain logic for daily-note memos.
//! This crate is the single source of truth for memo invariants.

pub mod config;
pub mod document;
pub mod extract;
pub mod filter;
pub mod host;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, MemoSettings};
pub use document::insert::{insert_after, Insertion, ANCHOR_NOT_FOUND};
pub use extract::links::{
    extract_external_image_urls, extract_internal_links, LinkMatch, LinkTarget,
};
pub use extract::tags::extract_tags;
pub use filter::evaluator::should_show;
pub use filter::spec::{ContentType, Duration, FilterSpec, StoredQuery};
pub use filter::{FilterError, FilterResult};
pub use host::{
    DailyNoteIndex, FileHandle, FileStore, FsVault, HostError, HostResult, RemoteMemos,
    RemoteStore,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoType};
pub use service::feed::{assemble, FeedPage};
pub use service::memo_loader::load_memos;
pub use service::memo_mutator::MemoMutator;
pub use service::memo_service::MemoService;
pub use service::memo_writer::MemoWriter;
pub use service::{MemoServiceError, MemoServiceResult};
pub use store::app_context::{AppContext, MemoAction, MemoState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

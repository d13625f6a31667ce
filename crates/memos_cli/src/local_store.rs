//! Vault-backed stand-in for the remote memo store.
//!
//! Listing parses the daily notes; deletion states live only in a remote
//! store, so hide/restore/delete report the store as unavailable.

use memos_core::{load_memos, FsVault, HostError, HostResult, Memo, RemoteMemos, RemoteStore};

pub struct LocalMemoStore<'v> {
    vault: &'v FsVault,
}

impl<'v> LocalMemoStore<'v> {
    pub fn new(vault: &'v FsVault) -> Self {
        Self { vault }
    }
}

impl RemoteStore for LocalMemoStore<'_> {
    fn list_memos(&self) -> HostResult<RemoteMemos> {
        let all = load_memos(self.vault, self.vault)
            .map_err(|err| HostError::Unavailable(err.to_string()))?;
        let (comment_memos, memos): (Vec<Memo>, Vec<Memo>) =
            all.into_iter().partition(Memo::is_comment);
        Ok(RemoteMemos {
            memos,
            comment_memos,
        })
    }

    fn list_deleted_memos(&self) -> HostResult<Vec<Memo>> {
        Ok(Vec::new())
    }

    fn hide(&self, _id: &str) -> HostResult<()> {
        Err(read_only())
    }

    fn restore(&self, _id: &str) -> HostResult<()> {
        Err(read_only())
    }

    fn delete(&self, _id: &str) -> HostResult<()> {
        Err(read_only())
    }
}

fn read_only() -> HostError {
    HostError::Unavailable("local vault keeps no deletion state".to_string())
}

//! In-process keyed locks serializing folder materialization.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry size above which idle entries are pruned.
const PRUNE_THRESHOLD: usize = 1024;

/// Async mutex per `(root, cumulative path)`.
///
/// Only guards callers in this process; two server instances can still
/// create duplicate folders.
#[derive(Debug, Default)]
pub struct PathLocks {
    locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lock for `path` under `root`.
    pub async fn acquire(&self, root: &str, path: &str) -> OwnedMutexGuard<()> {
        if self.locks.len() > PRUNE_THRESHOLD {
            self.prune();
        }
        let lock = self
            .locks
            .entry((root.to_string(), path.to_string()))
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// Drop entries nobody holds or waits on.
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_key_is_exclusive() {
        let locks = Arc::new(PathLocks::new());
        let guard = locks.acquire("root", "/A").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire("root", "/A").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_roots_do_not_contend() {
        let locks = PathLocks::new();
        let _a = locks.acquire("root-1", "/A").await;
        let _b = locks.acquire("root-2", "/A").await;
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn prune_drops_idle_entries() {
        let locks = PathLocks::new();
        {
            let _g = locks.acquire("root", "/A").await;
        }
        let _held = locks.acquire("root", "/B").await;
        locks.prune();
        assert_eq!(locks.len(), 1);
    }
}

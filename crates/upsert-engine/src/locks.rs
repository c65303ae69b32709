//! Per-key mutual exclusion for upserts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracker_core::ProjectRef;

type Key = (ProjectRef, String);

/// Process-wide lock table keyed by `(project, trimmed title)`.
///
/// Entries are created on first use and never removed, which keeps the
/// table as large as the number of distinct alert titles seen.
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<Key, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a key.
    ///
    /// The key is held until the returned guard is dropped.
    pub async fn acquire(&self, project: &ProjectRef, title: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks
                .entry((project.clone(), title.trim().to_string()))
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of keys seen so far.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns true if no key has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn project(value: &str) -> ProjectRef {
        ProjectRef::parse(value).unwrap()
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = KeyedLocks::new();
        let guard = locks.acquire(&project("42"), "Disk full").await;

        let second = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(&project("42"), "  Disk full "),
        )
        .await;
        assert!(second.is_err());

        drop(guard);
        let _again = locks.acquire(&project("42"), "Disk full").await;
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.acquire(&project("42"), "Disk full").await;
        let _b = locks.acquire(&project("43"), "Disk full").await;
        let _c = locks.acquire(&project("42"), "HighCPU").await;
        assert_eq!(locks.len(), 3);
    }
}

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-user upload serialization. Holding a guard for a user keeps every other
/// upload by that user waiting, which makes the quota check and the metadata
/// write one critical section within this process.
#[derive(Clone, Default)]
pub struct UploadLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl UploadLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, owner_id: Uuid) -> UploadGuard {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.entry(owner_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        let guard = lock.lock_owned().await;
        UploadGuard {
            owner_id,
            locks: self.clone(),
            guard: Some(guard),
        }
    }

    fn release(&self, owner_id: Uuid) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map's own reference left means nobody holds or awaits the lock.
        if map
            .get(&owner_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&owner_id);
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

pub struct UploadGuard {
    owner_id: Uuid,
    locks: UploadLocks,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        self.guard.take();
        self.locks.release(self.owner_id);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_user_is_serialized() {
        let locks = UploadLocks::new();
        let user = Uuid::new_v4();

        let first = locks.acquire(user).await;
        let waiting = tokio::time::timeout(Duration::from_millis(50), locks.acquire(user)).await;
        assert!(waiting.is_err());

        drop(first);
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(user)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn different_users_do_not_block() {
        let locks = UploadLocks::new();
        let _a = locks.acquire(Uuid::new_v4()).await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(Uuid::new_v4())).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn idle_entries_are_dropped() {
        let locks = UploadLocks::new();
        let guard = locks.acquire(Uuid::new_v4()).await;
        assert_eq!(locks.tracked_users(), 1);
        drop(guard);
        assert_eq!(locks.tracked_users(), 0);
    }
}

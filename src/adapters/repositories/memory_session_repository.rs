use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use async_trait::async_trait;

use crate::application::{
    error::ApplicationError, repositories::session_repository::SessionRepository,
};

/// Process-local revocation set, used when no Redis is configured. Entries are
/// purged once the token they revoke would have expired anyway.
#[derive(Default)]
pub struct MemorySessionRepository {
    revoked: Mutex<HashMap<String, Instant>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn purge_expired(revoked: &mut HashMap<String, Instant>, now: Instant) {
        revoked.retain(|_, until| *until > now);
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn revoke(&self, session_id: &str, ttl_seconds: u64) -> Result<(), ApplicationError> {
        let now = Instant::now();
        let mut revoked = self.revoked.lock().unwrap_or_else(|e| e.into_inner());
        Self::purge_expired(&mut revoked, now);
        revoked.insert(
            session_id.to_string(),
            now + Duration::from_secs(ttl_seconds.max(1)),
        );
        Ok(())
    }

    async fn is_revoked(&self, session_id: &str) -> Result<bool, ApplicationError> {
        let now = Instant::now();
        let revoked = self.revoked.lock().unwrap_or_else(|e| e.into_inner());
        Ok(revoked.get(session_id).is_some_and(|until| *until > now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revocation_lasts_for_ttl() {
        let repo = MemorySessionRepository::new();
        assert!(!repo.is_revoked("jti-1").await.unwrap());

        repo.revoke("jti-1", 60).await.unwrap();
        assert!(repo.is_revoked("jti-1").await.unwrap());
        assert!(!repo.is_revoked("jti-2").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entries_are_purged_on_write() {
        let repo = MemorySessionRepository::new();
        repo.revoked
            .lock()
            .unwrap()
            .insert("old".to_string(), Instant::now() - Duration::from_secs(1));

        assert!(!repo.is_revoked("old").await.unwrap());
        repo.revoke("new", 60).await.unwrap();
        assert_eq!(repo.revoked.lock().unwrap().len(), 1);
    }
}

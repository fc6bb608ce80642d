use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::application::{
    error::ApplicationError, repositories::session_repository::SessionRepository,
};

pub struct RedisSessionRepository {
    client: redis::aio::ConnectionManager,
}

impl RedisSessionRepository {
    pub fn new(client: redis::aio::ConnectionManager) -> Self {
        Self { client }
    }

    fn get_redis_key(session_id: &str) -> String {
        format!("revoked_session:{}", session_id)
    }
}

#[async_trait]
impl SessionRepository for RedisSessionRepository {
    async fn revoke(&self, session_id: &str, ttl_seconds: u64) -> Result<(), ApplicationError> {
        let key = Self::get_redis_key(session_id);
        let mut conn = self.client.clone();

        // Expires with the token itself, so the set never outgrows live sessions.
        conn.set_ex::<_, _, ()>(&key, 1u8, ttl_seconds.max(1))
            .await
            .map_err(|e| {
                ApplicationError::InternalError(format!("Failed to revoke session: {}", e))
            })?;

        info!("Session revoked in Redis for {}s", ttl_seconds);
        Ok(())
    }

    async fn is_revoked(&self, session_id: &str) -> Result<bool, ApplicationError> {
        let key = Self::get_redis_key(session_id);
        let mut conn = self.client.clone();

        let revoked: bool = conn.exists(&key).await.map_err(|e| {
            ApplicationError::InternalError(format!("Failed to check session: {}", e))
        })?;

        if revoked {
            debug!("Session {} found in revocation set", session_id);
        }
        Ok(revoked)
    }
}

use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// Denylist of logged-out session ids.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Marks a session id as revoked for `ttl_seconds`, i.e. until the token
    /// would have expired on its own.
    async fn revoke(&self, session_id: &str, ttl_seconds: u64) -> Result<(), ApplicationError>;

    async fn is_revoked(&self, session_id: &str) -> Result<bool, ApplicationError>;
}

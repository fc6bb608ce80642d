use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::share_link_dto::ShareLinkDTO, error::ApplicationError},
    domain::models::share_link::ShareLink,
};

#[async_trait]
pub trait ShareLinkRepository: Send + Sync {
    async fn create_share_link(&self, link: ShareLinkDTO) -> Result<ShareLink, ApplicationError>;
    async fn find_share_link(&self, id: Uuid) -> Result<Option<ShareLink>, ApplicationError>;
}

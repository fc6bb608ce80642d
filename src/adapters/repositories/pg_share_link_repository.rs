use async_trait::async_trait;
use sqlx::query_as;
use uuid::Uuid;

use crate::{
    application::{
        dto::share_link_dto::ShareLinkDTO, error::ApplicationError,
        repositories::share_link_repository::ShareLinkRepository,
    },
    domain::models::share_link::ShareLink,
};

pub struct PgShareLinkRepository {
    pool: sqlx::PgPool,
}

impl PgShareLinkRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareLinkRepository for PgShareLinkRepository {
    async fn create_share_link(&self, link: ShareLinkDTO) -> Result<ShareLink, ApplicationError> {
        let query = r#"
            INSERT INTO share_links (id, folder_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
        "#;
        let created: ShareLinkDTO = query_as::<_, ShareLinkDTO>(query)
            .bind(link.id)
            .bind(link.folder_id)
            .bind(link.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(created.into())
    }

    async fn find_share_link(&self, id: Uuid) -> Result<Option<ShareLink>, ApplicationError> {
        let query = "SELECT * FROM share_links WHERE id = $1";
        let fetched: Option<ShareLinkDTO> = query_as::<_, ShareLinkDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched.map(ShareLink::from))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::share_link::ShareLink;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkDTO {
    pub id: Uuid,
    pub folder_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ShareLinkDTO {
    pub fn for_insert(folder_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            folder_id,
            expires_at,
            created_at: None,
        }
    }
}

impl From<ShareLinkDTO> for ShareLink {
    fn from(value: ShareLinkDTO) -> Self {
        ShareLink {
            id: value.id,
            folder_id: value.folder_id,
            expires_at: value.expires_at,
            created_at: value.created_at.unwrap_or_else(Utc::now),
        }
    }
}

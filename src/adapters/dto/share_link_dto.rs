use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::{application::dto::share_link_dto::ShareLinkDTO, domain::models::folder::FolderContents};

impl FromRow<'_, PgRow> for ShareLinkDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ShareLinkDTO {
            id: row.try_get("id")?,
            folder_id: row.try_get("folder_id")?,
            expires_at: row.try_get("expires_at")?,
            created_at: Some(row.try_get("created_at")?),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateShareLinkRequest {
    pub duration: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShareLinkBody {
    pub id: Uuid,
    pub url: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ShareLinkResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(rename = "shareLink")]
    pub share_link: ShareLinkBody,
}

#[derive(Debug, Serialize)]
pub struct SharedFolderResponse {
    pub success: bool,
    pub folder: FolderContents,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

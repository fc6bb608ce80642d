use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::{
    application::{dto::folder_dto::FolderDTO, error::ApplicationError},
    domain::models::folder::{FolderSummary, Parent},
};

impl FromRow<'_, PgRow> for FolderDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        // Counts are only selected by listing queries.
        let file_count: Option<i64> = row.try_get("file_count").ok();
        let child_count: Option<i64> = row.try_get("child_count").ok();

        Ok(FolderDTO {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            owner_id: row.try_get("owner_id")?,
            parent_id: row.try_get("parent_id")?,
            created_at: Some(row.try_get("created_at")?),
            file_count: file_count.map(|c| c.max(0) as u64),
            child_count: child_count.map(|c| c.max(0) as u64),
        })
    }
}

/// Interprets a `parentId`/`folderId` value: absent, empty or `root` mean the
/// user's root.
pub fn parse_parent(raw: Option<&str>) -> Result<Parent, ApplicationError> {
    match raw.map(str::trim) {
        None | Some("") | Some("root") => Ok(Parent::Root),
        Some(value) => Uuid::parse_str(value)
            .map(Parent::Folder)
            .map_err(|_| ApplicationError::BadRequest("Invalid folder id".to_string())),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: Option<String>,
    /// Validated with [`parse_parent`], so `root` and malformed ids are handled there.
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl CreateFolderRequest {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct RenameFolderRequest {
    pub name: Option<String>,
}

impl RenameFolderRequest {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListFoldersQuery {
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FolderResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub folder: T,
}

#[derive(Debug, Serialize)]
pub struct FolderListResponse {
    pub success: bool,
    pub folders: Vec<FolderSummary>,
}

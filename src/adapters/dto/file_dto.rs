use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::{
    application::dto::file_dto::FileDTO,
    domain::models::{
        file::{FileDetail, StoredFile},
        usage::UsageReport,
    },
};

impl FromRow<'_, PgRow> for FileDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let size: i64 = row.try_get("size")?;
        // Only present when the query joins the parent folder.
        let folder_name: Option<String> = row.try_get("folder_name").ok().flatten();

        Ok(FileDTO {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            size: size.max(0) as u64,
            mime_type: row.try_get("mime_type")?,
            object_id: row.try_get("object_id")?,
            resource_kind: row.try_get("resource_kind")?,
            url: row.try_get("url")?,
            owner_id: row.try_get("owner_id")?,
            folder_id: row.try_get("folder_id")?,
            folder_name,
            created_at: Some(row.try_get("created_at")?),
        })
    }
}

impl FileDTO {
    pub fn sanitize(&mut self) {
        self.size = std::cmp::min(self.size, i64::MAX as u64);
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListFilesQuery {
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub success: bool,
    pub message: &'static str,
    pub file: StoredFile,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub success: bool,
    pub files: Vec<StoredFile>,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub success: bool,
    pub file: FileDetail,
}

#[derive(Debug, Serialize)]
pub struct StorageStatsResponse {
    pub success: bool,
    pub storage: UsageReport,
}

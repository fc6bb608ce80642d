use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::file::{FileDetail, FolderRef, ResourceKind, StoredFile, StoredObject};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileDTO {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub object_id: String,
    pub resource_kind: String,
    pub url: String,
    pub owner_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub folder_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl FileDTO {
    /// Metadata row for an object the store has already accepted.
    pub fn for_insert(
        name: String,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        object: &StoredObject,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            size: object.size,
            mime_type: object.mime_type.clone(),
            object_id: object.object_id.clone(),
            resource_kind: object.resource_kind.as_str().to_string(),
            url: object.url.clone(),
            owner_id,
            folder_id,
            folder_name: None,
            created_at: None,
        }
    }
}

impl From<FileDTO> for StoredFile {
    fn from(value: FileDTO) -> Self {
        StoredFile {
            id: value.id,
            name: value.name,
            size: value.size,
            mime_type: value.mime_type.clone(),
            locator: StoredObject {
                object_id: value.object_id,
                resource_kind: ResourceKind::parse(&value.resource_kind),
                url: value.url,
                size: value.size,
                mime_type: value.mime_type,
            },
            owner_id: value.owner_id,
            folder_id: value.folder_id,
            created_at: value.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<FileDTO> for FileDetail {
    fn from(mut value: FileDTO) -> Self {
        let folder = match (value.folder_id, value.folder_name.take()) {
            (Some(id), Some(name)) => Some(FolderRef { id, name }),
            _ => None,
        };
        FileDetail {
            file: value.into(),
            folder,
        }
    }
}

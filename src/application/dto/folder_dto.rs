use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::folder::{Folder, FolderCounts, FolderSummary};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FolderDTO {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub file_count: Option<u64>,
    pub child_count: Option<u64>,
}

impl FolderDTO {
    pub fn for_insert(name: String, owner_id: Uuid, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            owner_id,
            parent_id,
            ..Default::default()
        }
    }
}

impl From<FolderDTO> for Folder {
    fn from(value: FolderDTO) -> Self {
        Folder {
            id: value.id,
            name: value.name,
            owner_id: value.owner_id,
            parent_id: value.parent_id,
            created_at: value.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<FolderDTO> for FolderSummary {
    fn from(value: FolderDTO) -> Self {
        let counts = FolderCounts {
            files: value.file_count.unwrap_or(0),
            children: value.child_count.unwrap_or(0),
        };
        FolderSummary {
            folder: value.into(),
            counts,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::file::StoredFile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "userId")]
    pub owner_id: Uuid,
    #[serde(rename = "parentId")]
    pub parent_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FolderCounts {
    pub files: u64,
    pub children: u64,
}

/// A folder as it appears in a one-level listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderSummary {
    #[serde(flatten)]
    pub folder: Folder,
    #[serde(rename = "_count")]
    pub counts: FolderCounts,
}

/// A folder together with its direct contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    #[serde(flatten)]
    pub folder: Folder,
    pub files: Vec<StoredFile>,
    pub children: Vec<Folder>,
    #[serde(rename = "_count")]
    pub counts: FolderCounts,
}

impl FolderContents {
    pub fn new(folder: Folder, files: Vec<StoredFile>, children: Vec<Folder>) -> Self {
        let counts = FolderCounts {
            files: files.len() as u64,
            children: children.len() as u64,
        };
        Self {
            folder,
            files,
            children,
            counts,
        }
    }
}

/// Placement of a folder or file: the user's root or a concrete folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Folder(Uuid),
}

impl Parent {
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Parent::Root => None,
            Parent::Folder(id) => Some(*id),
        }
    }
}

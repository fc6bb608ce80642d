use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::folder_dto::FolderDTO, error::ApplicationError},
    domain::models::folder::{Folder, FolderSummary, Parent},
};

/// Every owner-scoped method matches on both `owner_id` and the folder id, so a
/// folder belonging to someone else reads exactly like a missing one.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    async fn create_folder(&self, folder: FolderDTO) -> Result<Folder, ApplicationError>;
    async fn find_owned(&self, owner_id: Uuid, id: Uuid)
        -> Result<Option<Folder>, ApplicationError>;
    /// Unscoped lookup, only for bearer-token reads such as share links.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Folder>, ApplicationError>;
    /// Direct children of `parent`, newest first, with per-folder counts.
    async fn list_children(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<FolderSummary>, ApplicationError>;
    async fn rename_folder(
        &self,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Folder>, ApplicationError>;
    /// Removes the given folders in one statement; returns how many rows went away.
    async fn delete_folders(&self, owner_id: Uuid, ids: &[Uuid]) -> Result<u64, ApplicationError>;
}

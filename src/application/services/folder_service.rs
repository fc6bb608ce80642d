use std::{collections::VecDeque, sync::Arc};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::{
        dto::folder_dto::FolderDTO,
        error::ApplicationError,
        repositories::{file_repository::FileRepository, folder_repository::FolderRepository},
        services::StorageService,
    },
    domain::models::folder::{Folder, FolderContents, FolderSummary, Parent},
};

/// Outcome of a recursive folder delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderDeletion {
    pub folders: u64,
    pub files: u64,
}

pub struct FolderService {
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn StorageService>,
}

fn folder_name(name: &str) -> Result<String, ApplicationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApplicationError::BadRequest(
            "Folder name is required".to_string(),
        ));
    }
    Ok(name.to_string())
}

impl FolderService {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            folders,
            files,
            storage,
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, ApplicationError> {
        let name = folder_name(name)?;

        if let Some(parent_id) = parent_id {
            self.folders
                .find_owned(owner_id, parent_id)
                .await?
                .ok_or(ApplicationError::NotFound("Parent folder"))?;
        }

        let folder = self
            .folders
            .create_folder(FolderDTO::for_insert(name, owner_id, parent_id))
            .await?;
        info!("User {} created folder {}", owner_id, folder.id);
        Ok(folder)
    }

    pub async fn list(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<FolderSummary>, ApplicationError> {
        self.folders.list_children(owner_id, parent).await
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<FolderContents, ApplicationError> {
        let folder = self.owned(owner_id, id).await?;
        let parent = Parent::Folder(folder.id);

        let children = self
            .folders
            .list_children(owner_id, parent)
            .await?
            .into_iter()
            .map(|summary| summary.folder)
            .collect();
        let files = self.files.list_files(owner_id, parent).await?;

        Ok(FolderContents::new(folder, files, children))
    }

    pub async fn rename(
        &self,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Folder, ApplicationError> {
        let name = folder_name(name)?;
        self.folders
            .rename_folder(owner_id, id, &name)
            .await?
            .ok_or(ApplicationError::NotFound("Folder"))
    }

    /// Deletes the folder and its whole subtree. Stored objects of every
    /// contained file are removed best-effort before any rows go away.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<FolderDeletion, ApplicationError> {
        let root = self.owned(owner_id, id).await?;

        let mut folder_ids = Vec::new();
        let mut files = Vec::new();
        let mut queue = VecDeque::from([root.id]);
        while let Some(current) = queue.pop_front() {
            folder_ids.push(current);
            let parent = Parent::Folder(current);
            for child in self.folders.list_children(owner_id, parent).await? {
                queue.push_back(child.folder.id);
            }
            files.extend(self.files.list_files(owner_id, parent).await?);
        }

        for file in &files {
            if let Err(e) = self.storage.delete(&file.locator).await {
                warn!(
                    "Could not remove stored object {} for file {} (continuing): {}",
                    file.locator.object_id, file.id, e
                );
            }
        }

        let file_ids: Vec<Uuid> = files.iter().map(|f| f.id).collect();
        let deleted_files = if file_ids.is_empty() {
            0
        } else {
            self.files.delete_files(owner_id, &file_ids).await?
        };
        let deleted_folders = self.folders.delete_folders(owner_id, &folder_ids).await?;

        info!(
            "User {} deleted folder {} ({} folders, {} files)",
            owner_id, id, deleted_folders, deleted_files
        );
        Ok(FolderDeletion {
            folders: deleted_folders,
            files: deleted_files,
        })
    }

    async fn owned(&self, owner_id: Uuid, id: Uuid) -> Result<Folder, ApplicationError> {
        self.folders
            .find_owned(owner_id, id)
            .await?
            .ok_or(ApplicationError::NotFound("Folder"))
    }
}

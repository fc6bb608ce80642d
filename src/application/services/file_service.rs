use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        dto::file_dto::FileDTO,
        error::ApplicationError,
        repositories::{file_repository::FileRepository, folder_repository::FolderRepository},
        services::{upload_locks::UploadLocks, StorageService},
    },
    domain::{
        config::StorageLimits,
        models::{
            file::{FileData, FileDetail, ObjectUpload, StoredFile},
            folder::Parent,
            usage::StorageUsage,
        },
    },
};

pub struct FileService {
    files: Arc<dyn FileRepository>,
    folders: Arc<dyn FolderRepository>,
    storage: Arc<dyn StorageService>,
    limits: StorageLimits,
    upload_locks: UploadLocks,
}

impl FileService {
    pub fn new(
        files: Arc<dyn FileRepository>,
        folders: Arc<dyn FolderRepository>,
        storage: Arc<dyn StorageService>,
        limits: StorageLimits,
    ) -> Self {
        Self {
            files,
            folders,
            storage,
            limits,
            upload_locks: UploadLocks::new(),
        }
    }

    pub fn limits(&self) -> StorageLimits {
        self.limits
    }

    /// Stores `data` for `owner_id`, optionally inside one of their folders.
    ///
    /// The quota is checked before any byte leaves the process, and uploads by the
    /// same user are serialized so two concurrent requests cannot both pass it.
    pub async fn upload(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        data: FileData,
    ) -> Result<StoredFile, ApplicationError> {
        if !data.validate_size(self.limits.max_upload_size) {
            return Err(ApplicationError::PayloadTooLarge);
        }

        if let Some(folder_id) = folder_id {
            self.folders
                .find_owned(owner_id, folder_id)
                .await?
                .ok_or(ApplicationError::NotFound("Folder"))?;
        }

        let _guard = self.upload_locks.acquire(owner_id).await;

        let usage = self.usage(owner_id).await?;
        if !usage.fits(data.size()) {
            warn!(
                "User {} over quota: {} used, {} incoming",
                owner_id,
                usage.used,
                data.size()
            );
            return Err(ApplicationError::QuotaExceeded {
                used: usage.used,
                limit: usage.limit,
            });
        }

        let filename = data.filename.clone();
        let stored = self
            .storage
            .upload(ObjectUpload::for_owner(owner_id, data))
            .await?;

        let created = self
            .files
            .create_file(FileDTO::for_insert(filename, owner_id, folder_id, &stored))
            .await;

        match created {
            Ok(file) => {
                info!(
                    "User {} uploaded file {} ({} bytes)",
                    owner_id, file.id, file.size
                );
                Ok(file)
            }
            Err(e) => {
                error!(
                    "Metadata write failed after storing {}; removing object",
                    stored.object_id
                );
                if let Err(cleanup) = self.storage.delete(&stored).await {
                    warn!("Orphaned object {}: {}", stored.object_id, cleanup);
                }
                Err(e)
            }
        }
    }

    pub async fn list(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<StoredFile>, ApplicationError> {
        self.files.list_files(owner_id, parent).await
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<FileDetail, ApplicationError> {
        self.files
            .find_owned(owner_id, id)
            .await?
            .ok_or(ApplicationError::NotFound("File"))
    }

    /// Removes the file. The stored object is deleted best-effort; once
    /// ownership is confirmed the metadata row is removed regardless.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), ApplicationError> {
        let detail = self.get(owner_id, id).await?;

        if let Err(e) = self.storage.delete(&detail.file.locator).await {
            warn!(
                "Could not remove stored object {} (continuing): {}",
                detail.file.locator.object_id, e
            );
        }

        self.files.delete_file(owner_id, id).await?;
        info!("User {} deleted file {}", owner_id, id);
        Ok(())
    }

    pub async fn usage(&self, owner_id: Uuid) -> Result<StorageUsage, ApplicationError> {
        let used = self.files.total_usage(owner_id).await?;
        Ok(StorageUsage::new(used, self.limits.user_quota))
    }
}

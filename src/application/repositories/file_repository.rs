use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::file_dto::FileDTO, error::ApplicationError},
    domain::models::{
        file::{FileDetail, StoredFile},
        folder::Parent,
    },
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_file(&self, file: FileDTO) -> Result<StoredFile, ApplicationError>;
    async fn find_owned(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FileDetail>, ApplicationError>;
    /// Files placed directly under `parent`, newest first.
    async fn list_files(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<StoredFile>, ApplicationError>;
    /// Sum of `size` across every file the user owns.
    async fn total_usage(&self, owner_id: Uuid) -> Result<u64, ApplicationError>;
    async fn delete_file(&self, owner_id: Uuid, id: Uuid) -> Result<bool, ApplicationError>;
    async fn delete_files(&self, owner_id: Uuid, ids: &[Uuid]) -> Result<u64, ApplicationError>;
}

use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{ObjectUpload, StoredObject},
};

/// Remote object store. Implementations make exactly one attempt per call.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, upload: ObjectUpload) -> Result<StoredObject, ApplicationError>;
    async fn delete(&self, object: &StoredObject) -> Result<(), ApplicationError>;
}

mod error;
mod s3_storage;
mod supabase_storage;

pub use error::StorageError;
pub use s3_storage::S3StorageService;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::{Provider, StorageSecrets},
};

pub fn create_storage_service(
    provider: &Provider,
    secrets: &StorageSecrets,
) -> Result<Arc<dyn StorageService>, StorageError> {
    if secrets.bucket_name.is_empty() {
        return Err(StorageError::InvalidCredentials(
            "Bucket name not configured".to_string(),
        ));
    }

    match provider {
        Provider::S3 => Ok(Arc::new(S3StorageService::new(secrets.clone()))),
        Provider::Supabase => Ok(Arc::new(SupabaseStorageService::new(secrets.clone()))),
    }
}

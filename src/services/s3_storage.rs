use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use tracing::debug;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::StorageSecrets,
        models::file::{ObjectUpload, ResourceKind, StoredObject},
    },
    services::error::StorageError,
};

/// Any S3-compatible endpoint (AWS, MinIO, Supabase's S3 gateway), addressed path-style.
pub struct S3StorageService {
    client: Client,
    bucket_name: String,
    public_base: String,
}

impl S3StorageService {
    pub fn new(secrets: StorageSecrets) -> Self {
        let credentials = Credentials::new(
            secrets.access_key_id.clone(),
            secrets.secret_access_key.clone(),
            None,
            None,
            "drive-service",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(secrets.region.clone()))
            .endpoint_url(secrets.endpoint.trim_end_matches('/'))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            public_base: secrets.public_base(),
            bucket_name: secrets.bucket_name,
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload(&self, upload: ObjectUpload) -> Result<StoredObject, ApplicationError> {
        let size = upload.data.size();
        let mime_type = upload.data.mime_type.clone();

        debug!("Putting {} ({} bytes) into {}", upload.key, size, self.bucket_name);
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&upload.key)
            .content_type(&mime_type)
            .content_length(size as i64)
            .body(ByteStream::from(upload.data.content))
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Upload failed: {}", e)))?;

        Ok(StoredObject {
            url: format!("{}/{}", self.public_base, upload.key),
            object_id: upload.key,
            resource_kind: ResourceKind::from_mime(&mime_type),
            size,
            mime_type,
        })
    }

    async fn delete(&self, object: &StoredObject) -> Result<(), ApplicationError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(&object.object_id)
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Delete failed: {}", e)))?;
        Ok(())
    }
}

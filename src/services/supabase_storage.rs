use async_trait::async_trait;
use reqwest::{multipart, Client};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::StorageSecrets,
        models::file::{ObjectUpload, ResourceKind, StoredObject},
    },
    services::error::StorageError,
};

/// Supabase Storage over its REST API. Uses the secret access key as the
/// service-role API key.
pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
    public_base: String,
}

impl SupabaseStorageService {
    pub fn new(secrets: StorageSecrets) -> Self {
        let storage_url = secrets.endpoint.trim_end_matches('/').to_string();
        let public_base = match &secrets.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/object/public/{}", storage_url, secrets.bucket_name),
        };
        Self {
            client: Client::new(),
            storage_url,
            api_key: secrets.secret_access_key,
            bucket_name: secrets.bucket_name,
            public_base,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.storage_url, self.bucket_name, key)
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    async fn upload(&self, upload: ObjectUpload) -> Result<StoredObject, ApplicationError> {
        let size = upload.data.size();
        let mime_type = upload.data.mime_type.clone();

        let file_part = multipart::Part::bytes(upload.data.content)
            .file_name(upload.data.filename)
            .mime_str(&mime_type)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let form = multipart::Form::new().part("file", file_part);

        let response = self
            .client
            .post(self.object_url(&upload.key))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                StorageError::ProviderError(format!("Upload failed: {}", error_text)).into(),
            );
        }

        Ok(StoredObject {
            url: format!("{}/{}", self.public_base, upload.key),
            object_id: upload.key,
            resource_kind: ResourceKind::from_mime(&mime_type),
            size,
            mime_type,
        })
    }

    async fn delete(&self, object: &StoredObject) -> Result<(), ApplicationError> {
        let response = self
            .client
            .delete(self.object_url(&object.object_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::NotFound(object.object_id.clone()).into());
        }

        if !response.status().is_success() {
            return Err(StorageError::ProviderError(format!(
                "Delete failed with status: {}",
                response.status()
            ))
            .into());
        }

        Ok(())
    }
}

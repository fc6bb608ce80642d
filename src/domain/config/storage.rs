use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Provider {
    #[serde(rename = "s3")]
    S3,
    #[serde(rename = "supabase")]
    Supabase,
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Provider::S3),
            "supabase" => Ok(Provider::Supabase),
            other => Err(format!("unknown storage provider '{}'", other)),
        }
    }
}

/// Connection details for the object store. Both providers speak to a bucket
/// behind an endpoint; the S3 backend additionally needs a region.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageSecrets {
    #[serde(rename = "endpoint")]
    pub endpoint: String,
    #[serde(rename = "region")]
    pub region: String,
    #[serde(rename = "accessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "secretAccessKey")]
    pub secret_access_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
    #[serde(rename = "publicUrl")]
    pub public_url: Option<String>,
}

impl StorageSecrets {
    /// Base URL under which stored objects are publicly reachable.
    pub fn public_base(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "{}/{}",
                self.endpoint.trim_end_matches('/'),
                self.bucket_name
            ),
        }
    }
}

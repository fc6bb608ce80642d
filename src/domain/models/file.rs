use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: String) -> Self {
        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn validate_size(&self, max_size: u64) -> bool {
        self.size() <= max_size
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Object-store write request: the bytes plus the logical path to place them under.
#[derive(Debug, Clone)]
pub struct ObjectUpload {
    pub key: String,
    pub data: FileData,
}

impl ObjectUpload {
    /// Places the upload under the owner's namespace with a collision-free key.
    pub fn for_owner(owner_id: Uuid, data: FileData) -> Self {
        let key = format!(
            "file-uploader/{}/{}-{}",
            owner_id,
            Uuid::new_v4(),
            sanitize_filename(&data.filename)
        );
        Self { key, data }
    }
}

fn sanitize_filename(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.is_empty() {
        "file".to_string()
    } else {
        safe
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Video,
    Raw,
}

impl ResourceKind {
    pub fn from_mime(mime_type: &str) -> Self {
        let top = mime_type.split('/').next().unwrap_or_default();
        match top {
            "image" => ResourceKind::Image,
            "video" | "audio" => ResourceKind::Video,
            _ => ResourceKind::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Raw => "raw",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "image" => ResourceKind::Image,
            "video" => ResourceKind::Video,
            _ => ResourceKind::Raw,
        }
    }
}

/// Locator returned by the object store, stored verbatim on the file row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredObject {
    #[serde(rename = "publicId")]
    pub object_id: String,
    #[serde(rename = "resourceType")]
    pub resource_kind: ResourceKind,
    pub url: String,
    #[serde(skip)]
    pub size: u64,
    #[serde(skip)]
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredFile {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(flatten)]
    pub locator: StoredObject,
    #[serde(rename = "userId")]
    pub owner_id: Uuid,
    #[serde(rename = "folderId")]
    pub folder_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderRef {
    pub id: Uuid,
    pub name: String,
}

/// File detail view, including the parent folder's name when placed in one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileDetail {
    #[serde(flatten)]
    pub file: StoredFile,
    pub folder: Option<FolderRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_kind_follows_mime_family() {
        assert_eq!(ResourceKind::from_mime("image/png"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_mime("audio/mpeg"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_mime("application/pdf"), ResourceKind::Raw);
        assert_eq!(ResourceKind::from_mime(""), ResourceKind::Raw);
    }

    #[test]
    fn upload_key_is_namespaced_per_owner() {
        let owner = Uuid::new_v4();
        let data = FileData::new(vec![1, 2, 3], "my report (final).pdf".into(), "application/pdf".into());
        let upload = ObjectUpload::for_owner(owner, data);

        assert!(upload.key.starts_with(&format!("file-uploader/{}/", owner)));
        assert!(upload.key.ends_with("my_report__final_.pdf"));
    }
}

pub mod credential_service;
pub mod file_service;
pub mod folder_service;
pub mod password;
pub mod share_service;
mod storage_service;
pub mod upload_locks;

pub use credential_service::{CredentialService, Session};
pub use file_service::FileService;
pub use folder_service::FolderService;
pub use share_service::ShareService;
pub use storage_service::StorageService;

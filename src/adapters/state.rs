use axum::extract::FromRef;
use std::sync::Arc;

use crate::application::services::{CredentialService, FileService, FolderService, ShareService};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub folders: Arc<FolderService>,
    pub files: Arc<FileService>,
    pub shares: Arc<ShareService>,
}

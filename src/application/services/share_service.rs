use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    application::{
        dto::share_link_dto::ShareLinkDTO,
        error::ApplicationError,
        repositories::{
            file_repository::FileRepository, folder_repository::FolderRepository,
            share_link_repository::ShareLinkRepository,
        },
    },
    domain::models::{
        folder::{FolderContents, Parent},
        share_link::{ShareDuration, ShareLink},
    },
};

#[derive(Debug, Clone)]
pub struct IssuedShareLink {
    pub link: ShareLink,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct SharedFolder {
    pub folder: FolderContents,
    pub expires_at: DateTime<Utc>,
}

pub struct ShareService {
    share_links: Arc<dyn ShareLinkRepository>,
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
    frontend_url: String,
}

impl ShareService {
    pub fn new(
        share_links: Arc<dyn ShareLinkRepository>,
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            share_links,
            folders,
            files,
            frontend_url: frontend_url.into(),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        folder_id: Uuid,
        duration: &str,
    ) -> Result<IssuedShareLink, ApplicationError> {
        self.create_at(owner_id, folder_id, duration, Utc::now())
            .await
    }

    pub async fn create_at(
        &self,
        owner_id: Uuid,
        folder_id: Uuid,
        duration: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedShareLink, ApplicationError> {
        self.folders
            .find_owned(owner_id, folder_id)
            .await?
            .ok_or(ApplicationError::NotFound("Folder"))?;

        let invalid = || {
            ApplicationError::BadRequest(
                "Invalid duration format. Use format like \"1d\", \"7d\", \"30d\"".to_string(),
            )
        };
        let expires_at = ShareDuration::parse(duration)
            .and_then(|d| d.expires_from(now))
            .ok_or_else(invalid)?;

        let link = self
            .share_links
            .create_share_link(ShareLinkDTO::for_insert(folder_id, expires_at))
            .await?;
        let url = format!("{}/share/{}", self.frontend_url, link.id);

        info!(
            "User {} shared folder {} until {}",
            owner_id, folder_id, link.expires_at
        );
        Ok(IssuedShareLink { link, url })
    }

    pub async fn resolve(&self, share_id: Uuid) -> Result<SharedFolder, ApplicationError> {
        self.resolve_at(share_id, Utc::now()).await
    }

    /// Public read: possession of the id is the only access check.
    pub async fn resolve_at(
        &self,
        share_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SharedFolder, ApplicationError> {
        let link = self
            .share_links
            .find_share_link(share_id)
            .await?
            .ok_or(ApplicationError::NotFound("Share link"))?;

        if link.is_expired_at(now) {
            debug!("Share link {} expired at {}", link.id, link.expires_at);
            return Err(ApplicationError::Expired);
        }

        let folder = self
            .folders
            .find_by_id(link.folder_id)
            .await?
            .ok_or(ApplicationError::NotFound("Share link"))?;
        let parent = Parent::Folder(folder.id);

        let mut children: Vec<_> = self
            .folders
            .list_children(folder.owner_id, parent)
            .await?
            .into_iter()
            .map(|summary| summary.folder)
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        let files = self.files.list_files(folder.owner_id, parent).await?;

        Ok(SharedFolder {
            folder: FolderContents::new(folder, files, children),
            expires_at: link.expires_at,
        })
    }
}

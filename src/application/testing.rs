//! In-memory stand-ins for the persistence layer and the object store.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration as StdDuration,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    application::{
        dto::{
            file_dto::FileDTO, folder_dto::FolderDTO, share_link_dto::ShareLinkDTO,
            user_dto::UserDTO,
        },
        error::ApplicationError,
        repositories::{
            file_repository::FileRepository, folder_repository::FolderRepository,
            share_link_repository::ShareLinkRepository, user_repository::UserRepository,
        },
        services::StorageService,
    },
    domain::models::{
        file::{FileDetail, FolderRef, ObjectUpload, ResourceKind, StoredFile, StoredObject},
        folder::{Folder, FolderCounts, FolderSummary, Parent},
        share_link::ShareLink,
        user::User,
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    folders: Vec<Folder>,
    files: Vec<StoredFile>,
    share_links: HashMap<Uuid, ShareLink>,
    ticks: i64,
}

impl Tables {
    /// Strictly increasing timestamps so "newest first" is deterministic.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_000) + Duration::seconds(self.ticks)
    }

    fn summary(&self, folder: &Folder) -> FolderSummary {
        FolderSummary {
            folder: folder.clone(),
            counts: FolderCounts {
                files: self
                    .files
                    .iter()
                    .filter(|f| f.folder_id == Some(folder.id))
                    .count() as u64,
                children: self
                    .folders
                    .iter()
                    .filter(|f| f.parent_id == Some(folder.id))
                    .count() as u64,
            },
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_file_inserts: AtomicBool,
}

impl InMemoryStore {
    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn seed_folder(&self, owner_id: Uuid, parent_id: Option<Uuid>, name: &str) -> Folder {
        let mut tables = self.tables();
        let folder = Folder {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
            parent_id,
            created_at: tables.next_timestamp(),
        };
        tables.folders.push(folder.clone());
        folder
    }

    pub fn seed_file(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        size: u64,
    ) -> StoredFile {
        let mut tables = self.tables();
        let file = StoredFile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            size,
            mime_type: "text/plain".to_string(),
            locator: StoredObject {
                object_id: format!("file-uploader/{}/{}", owner_id, Uuid::new_v4()),
                resource_kind: ResourceKind::Raw,
                url: format!("https://objects.test/{}", name),
                size,
                mime_type: "text/plain".to_string(),
            },
            owner_id,
            folder_id,
            created_at: tables.next_timestamp(),
        };
        tables.files.push(file.clone());
        file
    }

    /// Makes `create_file` fail as if the database were unreachable.
    pub fn fail_file_inserts(&self, fail: bool) {
        self.fail_file_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn file_exists(&self, id: Uuid) -> bool {
        self.tables().files.iter().any(|f| f.id == id)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(ApplicationError::Conflict("Email already exists".to_string()));
        }
        let mut user = User::from(user);
        user.created_at = tables.next_timestamp();
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApplicationError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl FolderRepository for InMemoryStore {
    async fn create_folder(&self, folder: FolderDTO) -> Result<Folder, ApplicationError> {
        let mut tables = self.tables();
        let mut folder = Folder::from(folder);
        folder.created_at = tables.next_timestamp();
        tables.folders.push(folder.clone());
        Ok(folder)
    }

    async fn find_owned(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Folder>, ApplicationError> {
        Ok(self
            .tables()
            .folders
            .iter()
            .find(|f| f.id == id && f.owner_id == owner_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Folder>, ApplicationError> {
        Ok(self.tables().folders.iter().find(|f| f.id == id).cloned())
    }

    async fn list_children(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<FolderSummary>, ApplicationError> {
        let tables = self.tables();
        let mut children: Vec<FolderSummary> = tables
            .folders
            .iter()
            .filter(|f| f.owner_id == owner_id && f.parent_id == parent.id())
            .map(|f| tables.summary(f))
            .collect();
        children.sort_by(|a, b| b.folder.created_at.cmp(&a.folder.created_at));
        Ok(children)
    }

    async fn rename_folder(
        &self,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Folder>, ApplicationError> {
        let mut tables = self.tables();
        Ok(tables
            .folders
            .iter_mut()
            .find(|f| f.id == id && f.owner_id == owner_id)
            .map(|f| {
                f.name = name.to_string();
                f.clone()
            }))
    }

    async fn delete_folders(&self, owner_id: Uuid, ids: &[Uuid]) -> Result<u64, ApplicationError> {
        let mut tables = self.tables();
        let before = tables.folders.len();
        tables
            .folders
            .retain(|f| !(f.owner_id == owner_id && ids.contains(&f.id)));
        Ok((before - tables.folders.len()) as u64)
    }
}

#[async_trait]
impl FileRepository for InMemoryStore {
    async fn create_file(&self, file: FileDTO) -> Result<StoredFile, ApplicationError> {
        if self.fail_file_inserts.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError("connection reset".to_string()));
        }
        let mut tables = self.tables();
        let mut file = StoredFile::from(file);
        file.created_at = tables.next_timestamp();
        tables.files.push(file.clone());
        Ok(file)
    }

    async fn find_owned(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FileDetail>, ApplicationError> {
        let tables = self.tables();
        Ok(tables
            .files
            .iter()
            .find(|f| f.id == id && f.owner_id == owner_id)
            .map(|f| FileDetail {
                file: f.clone(),
                folder: f.folder_id.and_then(|folder_id| {
                    tables
                        .folders
                        .iter()
                        .find(|folder| folder.id == folder_id)
                        .map(|folder| FolderRef {
                            id: folder.id,
                            name: folder.name.clone(),
                        })
                }),
            }))
    }

    async fn list_files(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<StoredFile>, ApplicationError> {
        let mut files: Vec<StoredFile> = self
            .tables()
            .files
            .iter()
            .filter(|f| f.owner_id == owner_id && f.folder_id == parent.id())
            .cloned()
            .collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(files)
    }

    async fn total_usage(&self, owner_id: Uuid) -> Result<u64, ApplicationError> {
        Ok(self
            .tables()
            .files
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.size)
            .sum())
    }

    async fn delete_file(&self, owner_id: Uuid, id: Uuid) -> Result<bool, ApplicationError> {
        Ok(self.delete_files(owner_id, &[id]).await? > 0)
    }

    async fn delete_files(&self, owner_id: Uuid, ids: &[Uuid]) -> Result<u64, ApplicationError> {
        let mut tables = self.tables();
        let before = tables.files.len();
        tables
            .files
            .retain(|f| !(f.owner_id == owner_id && ids.contains(&f.id)));
        Ok((before - tables.files.len()) as u64)
    }
}

#[async_trait]
impl ShareLinkRepository for InMemoryStore {
    async fn create_share_link(&self, link: ShareLinkDTO) -> Result<ShareLink, ApplicationError> {
        let mut tables = self.tables();
        let mut link = ShareLink::from(link);
        link.created_at = tables.next_timestamp();
        tables.share_links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn find_share_link(&self, id: Uuid) -> Result<Option<ShareLink>, ApplicationError> {
        Ok(self.tables().share_links.get(&id).cloned())
    }
}

/// Object store double that records calls and can be told to fail.
#[derive(Default)]
pub struct FakeStorage {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
    upload_delay: Mutex<Option<StdDuration>>,
}

impl FakeStorage {
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_upload_delay(&self, delay: StdDuration) {
        *self.upload_delay.lock().unwrap() = Some(delay);
    }

    pub fn uploaded_objects(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    /// Every object a delete was attempted for, successful or not.
    pub fn deleted_objects(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageService for FakeStorage {
    async fn upload(&self, upload: ObjectUpload) -> Result<StoredObject, ApplicationError> {
        let delay = *self.upload_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(ApplicationError::UploadError("store unavailable".to_string()));
        }
        self.uploads.lock().unwrap().push(upload.key.clone());
        Ok(StoredObject {
            url: format!("https://objects.test/{}", upload.key),
            resource_kind: ResourceKind::from_mime(&upload.data.mime_type),
            size: upload.data.size(),
            mime_type: upload.data.mime_type,
            object_id: upload.key,
        })
    }

    async fn delete(&self, object: &StoredObject) -> Result<(), ApplicationError> {
        self.deletes.lock().unwrap().push(object.object_id.clone());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ApplicationError::UploadError("store unavailable".to_string()));
        }
        Ok(())
    }
}

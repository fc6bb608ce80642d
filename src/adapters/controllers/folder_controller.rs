use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    adapters::{
        dto::{
            folder_dto::{
                parse_parent, CreateFolderRequest, FolderListResponse, FolderResponse,
                ListFoldersQuery, RenameFolderRequest,
            },
            user_dto::MessageResponse,
        },
        extractors::{AppJson, AppPath},
    },
    application::{
        error::ApplicationError,
        services::{FolderService, Session},
    },
    domain::models::folder::{Folder, FolderContents},
};

pub struct FolderController;

impl FolderController {
    /// POST /api/folders
    pub async fn create_folder(
        State(folders): State<Arc<FolderService>>,
        session: Session,
        AppJson(body): AppJson<CreateFolderRequest>,
    ) -> Result<(StatusCode, Json<FolderResponse<Folder>>), ApplicationError> {
        let parent = parse_parent(body.parent_id.as_deref())?;
        let folder = folders
            .create(session.user_id, body.name(), parent.id())
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(FolderResponse {
                success: true,
                message: Some("Folder created successfully"),
                folder,
            }),
        ))
    }

    /// GET /api/folders?parentId=
    pub async fn list_folders(
        State(folders): State<Arc<FolderService>>,
        session: Session,
        Query(query): Query<ListFoldersQuery>,
    ) -> Result<Json<FolderListResponse>, ApplicationError> {
        let parent = parse_parent(query.parent_id.as_deref())?;
        let folders = folders.list(session.user_id, parent).await?;
        Ok(Json(FolderListResponse {
            success: true,
            folders,
        }))
    }

    /// GET /api/folders/{folder_id}
    pub async fn get_folder(
        State(folders): State<Arc<FolderService>>,
        session: Session,
        AppPath(folder_id): AppPath<Uuid>,
    ) -> Result<Json<FolderResponse<FolderContents>>, ApplicationError> {
        let folder = folders.get(session.user_id, folder_id).await?;
        Ok(Json(FolderResponse {
            success: true,
            message: None,
            folder,
        }))
    }

    /// PUT /api/folders/{folder_id}
    pub async fn rename_folder(
        State(folders): State<Arc<FolderService>>,
        session: Session,
        AppPath(folder_id): AppPath<Uuid>,
        AppJson(body): AppJson<RenameFolderRequest>,
    ) -> Result<Json<FolderResponse<Folder>>, ApplicationError> {
        let folder = folders
            .rename(session.user_id, folder_id, body.name())
            .await?;
        Ok(Json(FolderResponse {
            success: true,
            message: Some("Folder renamed successfully"),
            folder,
        }))
    }

    /// DELETE /api/folders/{folder_id}
    pub async fn delete_folder(
        State(folders): State<Arc<FolderService>>,
        session: Session,
        AppPath(folder_id): AppPath<Uuid>,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        folders.delete(session.user_id, folder_id).await?;
        Ok(Json(MessageResponse::ok("Folder deleted successfully")))
    }
}

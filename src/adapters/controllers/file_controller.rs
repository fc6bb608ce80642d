use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    adapters::{
        dto::{
            file_dto::{
                FileListResponse, FileResponse, ListFilesQuery, StorageStatsResponse,
                UploadFileResponse,
            },
            folder_dto::parse_parent,
            user_dto::MessageResponse,
        },
        extractors::AppPath,
    },
    application::{
        error::ApplicationError,
        services::{FileService, Session},
    },
    domain::models::{file::FileData, folder::Parent},
};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Body-limit overflows surface as 413, any other malformed body as 400.
fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload body over limit: {}", e);
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest("Invalid request format".to_string())
}

pub struct FileController;

impl FileController {
    /// POST /api/files/upload
    /// Multipart: `file` (required), `folderId` (optional)
    pub async fn upload_file(
        State(files): State<Arc<FileService>>,
        session: Session,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<UploadFileResponse>), ApplicationError> {
        let mut file_data: Option<FileData> = None;
        let mut folder_id: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("file").to_string();
                    let mime_type = field
                        .content_type()
                        .filter(|ct| !ct.is_empty())
                        .unwrap_or(DEFAULT_MIME_TYPE)
                        .to_string();
                    let content = field.bytes().await.map_err(multipart_error)?;
                    file_data = Some(FileData::new(content.to_vec(), filename, mime_type));
                }
                "folderId" => {
                    folder_id = Some(field.text().await.map_err(|e| {
                        warn!("Invalid folderId field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let data = file_data
            .ok_or_else(|| ApplicationError::BadRequest("No file uploaded".to_string()))?;
        let folder_id = parse_parent(folder_id.as_deref())?.id();

        info!(
            "Upload by user {}: {} ({} bytes)",
            session.user_id,
            data.filename,
            data.size()
        );
        let file = files.upload(session.user_id, folder_id, data).await?;

        Ok((
            StatusCode::CREATED,
            Json(UploadFileResponse {
                success: true,
                message: "File uploaded successfully",
                file,
            }),
        ))
    }

    /// GET /api/files?folderId=
    pub async fn list_files(
        State(files): State<Arc<FileService>>,
        session: Session,
        Query(query): Query<ListFilesQuery>,
    ) -> Result<Json<FileListResponse>, ApplicationError> {
        let parent: Parent = parse_parent(query.folder_id.as_deref())?;
        let files = files.list(session.user_id, parent).await?;
        Ok(Json(FileListResponse {
            success: true,
            files,
        }))
    }

    /// GET /api/files/{file_id}
    pub async fn get_file(
        State(files): State<Arc<FileService>>,
        session: Session,
        AppPath(file_id): AppPath<Uuid>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let file = files.get(session.user_id, file_id).await?;
        Ok(Json(FileResponse {
            success: true,
            file,
        }))
    }

    /// DELETE /api/files/{file_id}
    pub async fn delete_file(
        State(files): State<Arc<FileService>>,
        session: Session,
        AppPath(file_id): AppPath<Uuid>,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        files.delete(session.user_id, file_id).await?;
        Ok(Json(MessageResponse::ok("File deleted successfully")))
    }

    /// GET /api/storage/stats
    pub async fn storage_stats(
        State(files): State<Arc<FileService>>,
        session: Session,
    ) -> Result<Json<StorageStatsResponse>, ApplicationError> {
        let usage = files.usage(session.user_id).await?;
        Ok(Json(StorageStatsResponse {
            success: true,
            storage: usage.report(),
        }))
    }
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    adapters::{
        dto::share_link_dto::{
            CreateShareLinkRequest, ShareLinkBody, ShareLinkResponse, SharedFolderResponse,
        },
        extractors::{AppJson, AppPath},
    },
    application::{
        error::ApplicationError,
        services::{Session, ShareService},
    },
};

pub struct ShareController;

impl ShareController {
    /// POST /api/share/folder/{folder_id}
    pub async fn create_share_link(
        State(shares): State<Arc<ShareService>>,
        session: Session,
        AppPath(folder_id): AppPath<Uuid>,
        AppJson(body): AppJson<CreateShareLinkRequest>,
    ) -> Result<(StatusCode, Json<ShareLinkResponse>), ApplicationError> {
        let duration = body.duration.as_deref().unwrap_or_default();
        let issued = shares.create(session.user_id, folder_id, duration).await?;

        Ok((
            StatusCode::CREATED,
            Json(ShareLinkResponse {
                success: true,
                message: "Share link created successfully",
                share_link: ShareLinkBody {
                    id: issued.link.id,
                    url: issued.url,
                    expires_at: issued.link.expires_at,
                },
            }),
        ))
    }

    /// GET /api/share/{share_id}, reachable without a session.
    pub async fn get_shared_folder(
        State(shares): State<Arc<ShareService>>,
        AppPath(share_id): AppPath<String>,
    ) -> Result<Json<SharedFolderResponse>, ApplicationError> {
        // Unknown and malformed ids are indistinguishable to the caller.
        let share_id = Uuid::parse_str(&share_id).map_err(|_| {
            debug!("Malformed share id {}", share_id);
            ApplicationError::NotFound("Share link")
        })?;

        let shared = shares.resolve(share_id).await?;
        Ok(Json(SharedFolderResponse {
            success: true,
            folder: shared.folder,
            expires_at: shared.expires_at,
        }))
    }
}

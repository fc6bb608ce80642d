use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    adapters::{
        dto::user_dto::{LoginRequest, MessageResponse, SignupRequest, SignupResponse, UserResponse},
        extractors::AppJson,
        middleware::{expired_session_cookie, session_cookie, SESSION_COOKIE},
    },
    application::{
        error::ApplicationError,
        services::{CredentialService, Session},
    },
};

pub struct AuthController;

impl AuthController {
    /// POST /api/auth/signup
    pub async fn signup(
        State(credentials): State<Arc<CredentialService>>,
        AppJson(body): AppJson<SignupRequest>,
    ) -> Result<(StatusCode, Json<SignupResponse>), ApplicationError> {
        let user_id = credentials
            .register(body.name(), body.email(), body.password())
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(SignupResponse {
                success: true,
                message: "User created successfully",
                user_id,
            }),
        ))
    }

    /// POST /api/auth/login
    pub async fn login(
        State(credentials): State<Arc<CredentialService>>,
        jar: CookieJar,
        AppJson(body): AppJson<LoginRequest>,
    ) -> Result<(CookieJar, Json<UserResponse>), ApplicationError> {
        let issued = credentials.authenticate(body.email(), body.password()).await?;

        Ok((
            jar.add(session_cookie(issued.token)),
            Json(UserResponse {
                success: true,
                message: Some("Login successful"),
                user: issued.user,
            }),
        ))
    }

    /// POST /api/auth/logout
    ///
    /// Always succeeds; a valid cookie additionally gets its session revoked.
    pub async fn logout(
        State(credentials): State<Arc<CredentialService>>,
        jar: CookieJar,
    ) -> Result<(CookieJar, Json<MessageResponse>), ApplicationError> {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            if let Ok(session) = credentials.verify(cookie.value()).await {
                credentials.invalidate(&session).await?;
            }
        }

        Ok((
            jar.remove(expired_session_cookie()),
            Json(MessageResponse::ok("Logout successful")),
        ))
    }

    /// GET /api/auth/me
    pub async fn me(
        State(credentials): State<Arc<CredentialService>>,
        session: Session,
    ) -> Result<Json<UserResponse>, ApplicationError> {
        let user = credentials.current_user(&session).await?;
        Ok(Json(UserResponse {
            success: true,
            message: None,
            user,
        }))
    }
}

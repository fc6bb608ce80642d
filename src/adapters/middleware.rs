use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use crate::application::{
    error::ApplicationError,
    services::{credential_service::SESSION_TTL_DAYS, CredentialService, Session},
};

pub const SESSION_COOKIE: &str = "token";

/// Session cookie: script-inaccessible, HTTPS-only, sent on cross-site requests.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Cookie matching the session cookie's attributes, for removal.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Rejects requests without a valid session cookie and attaches the verified
/// `Session` to the request for handlers downstream.
pub async fn require_session(
    State(credentials): State<Arc<CredentialService>>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApplicationError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => {
            debug!("Request without session cookie: {}", request.uri().path());
            return Err(ApplicationError::Unauthorized);
        }
    };

    let session = credentials.verify(&token).await?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(ApplicationError::Unauthorized)
    }
}

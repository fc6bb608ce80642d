use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        dto::user_dto::UserDTO,
        error::ApplicationError,
        repositories::{session_repository::SessionRepository, user_repository::UserRepository},
        services::password,
    },
    domain::models::user::UserSummary,
};

pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: u64,
    exp: u64,
    jti: String,
}

/// A verified session: who the caller is and when their token lapses.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: Uuid,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: UserSummary,
    pub expires_at: DateTime<Utc>,
}

pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        secret: &str,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            users,
            sessions,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Uuid, ApplicationError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApplicationError::BadRequest(
                "All fields are required".to_string(),
            ));
        }

        let password = password.to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password(&password)).await??;

        // Duplicate emails are caught by the unique constraint, not a pre-check.
        let user = self
            .users
            .create_user(UserDTO::for_insert(
                name.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;

        info!("Registered user {}", user.id);
        Ok(user.id)
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, ApplicationError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApplicationError::BadRequest(
                "Email and password required".to_string(),
            ));
        }

        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            debug!("Login attempt for unknown email");
            ApplicationError::InvalidCredentials
        })?;

        let stored_hash = user.password_hash.clone();
        let password = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
                .await??;
        if !matches {
            warn!("Failed login for user {}", user.id);
            return Err(ApplicationError::InvalidCredentials);
        }

        let (token, expires_at) = self.issue_token(user.id, Utc::now())?;
        info!("User {} logged in", user.id);
        Ok(IssuedSession {
            token,
            user: user.into(),
            expires_at,
        })
    }

    /// Signs a session token for `user_id` valid for seven days from `issued_at`.
    pub fn issue_token(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), ApplicationError> {
        let expires_at = issued_at + Duration::days(SESSION_TTL_DAYS);
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp().max(0) as u64,
            exp: expires_at.timestamp().max(0) as u64,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApplicationError::InternalError(format!("Token signing failed: {}", e)))?;
        Ok((token, expires_at))
    }

    pub async fn verify(&self, token: &str) -> Result<Session, ApplicationError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Session token rejected: {}", e);
                ApplicationError::Unauthorized
            })?;
        let claims = data.claims;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApplicationError::Unauthorized)?;
        if self.sessions.is_revoked(&claims.jti).await? {
            debug!("Session {} was logged out", claims.jti);
            return Err(ApplicationError::Unauthorized);
        }

        let expires_at = Utc
            .timestamp_opt(claims.exp as i64, 0)
            .single()
            .ok_or(ApplicationError::Unauthorized)?;

        Ok(Session {
            user_id,
            session_id: claims.jti,
            expires_at,
        })
    }

    /// Revokes the session until its natural expiry so the token stops verifying.
    pub async fn invalidate(&self, session: &Session) -> Result<(), ApplicationError> {
        let remaining = (session.expires_at - Utc::now()).num_seconds().max(1) as u64;
        self.sessions.revoke(&session.session_id, remaining).await?;
        info!("User {} logged out", session.user_id);
        Ok(())
    }

    pub async fn current_user(&self, session: &Session) -> Result<UserSummary, ApplicationError> {
        self.users
            .find_by_id(session.user_id)
            .await?
            .map(UserSummary::from)
            .ok_or(ApplicationError::Unauthorized)
    }
}

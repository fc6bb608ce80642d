use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDTO {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserDTO {
    /// Builds the row for a fresh signup with a newly minted id.
    pub fn for_insert(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: None,
        }
    }
}

impl From<UserDTO> for User {
    fn from(value: UserDTO) -> Self {
        User {
            id: value.id,
            name: value.name,
            email: value.email,
            password_hash: value.password_hash,
            created_at: value.created_at.unwrap_or_else(Utc::now),
        }
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::user_dto::UserDTO, error::ApplicationError},
    domain::models::user::User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user; a duplicate email surfaces as `ApplicationError::Conflict`.
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApplicationError>;
}

use async_trait::async_trait;
use sqlx::query_as;
use uuid::Uuid;

use crate::{
    application::{
        dto::user_dto::UserDTO, error::ApplicationError,
        repositories::user_repository::UserRepository,
    },
    domain::models::user::User,
};

pub struct PgUserRepository {
    pool: sqlx::PgPool,
}

impl PgUserRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        let query = r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        "#;
        let created_user: UserDTO = query_as::<_, UserDTO>(query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    ApplicationError::Conflict("Email already exists".to_string())
                }
                _ => ApplicationError::DatabaseError(e.to_string()),
            })?;
        Ok(created_user.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM users WHERE email = $1";
        let fetched_user: Option<UserDTO> = query_as::<_, UserDTO>(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched_user.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApplicationError> {
        let query = "SELECT * FROM users WHERE id = $1";
        let fetched_user: Option<UserDTO> = query_as::<_, UserDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched_user.map(User::from))
    }
}

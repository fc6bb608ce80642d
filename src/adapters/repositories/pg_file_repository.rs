use async_trait::async_trait;
use sqlx::{query_as, query_scalar};
use uuid::Uuid;

use crate::{
    application::{
        dto::file_dto::FileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::{
        file::{FileDetail, StoredFile},
        folder::Parent,
    },
};

pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<StoredFile, ApplicationError> {
        let mut file = file;
        file.sanitize();

        let query = r#"
            INSERT INTO files (
                id, name, size, mime_type, object_id,
                resource_kind, url, owner_id, folder_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
        "#;

        let created: FileDTO = query_as::<_, FileDTO>(query)
            .bind(file.id)
            .bind(&file.name)
            .bind(file.size as i64)
            .bind(&file.mime_type)
            .bind(&file.object_id)
            .bind(&file.resource_kind)
            .bind(&file.url)
            .bind(file.owner_id)
            .bind(file.folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn find_owned(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FileDetail>, ApplicationError> {
        let query = r#"
            SELECT fl.*, fo.name AS folder_name
            FROM files fl
            LEFT JOIN folders fo ON fo.id = fl.folder_id
            WHERE fl.id = $1 AND fl.owner_id = $2
        "#;
        let fetched: Option<FileDTO> = query_as::<_, FileDTO>(query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched.map(FileDetail::from))
    }

    async fn list_files(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<StoredFile>, ApplicationError> {
        let query = r#"
            SELECT * FROM files
            WHERE owner_id = $1 AND folder_id IS NOT DISTINCT FROM $2
            ORDER BY created_at DESC
        "#;
        let rows: Vec<FileDTO> = query_as::<_, FileDTO>(query)
            .bind(owner_id)
            .bind(parent.id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(StoredFile::from).collect())
    }

    async fn total_usage(&self, owner_id: Uuid) -> Result<u64, ApplicationError> {
        let used: i64 =
            query_scalar("SELECT COALESCE(SUM(size), 0)::BIGINT FROM files WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(used.max(0) as u64)
    }

    async fn delete_file(&self, owner_id: Uuid, id: Uuid) -> Result<bool, ApplicationError> {
        Ok(self.delete_files(owner_id, &[id]).await? > 0)
    }

    async fn delete_files(&self, owner_id: Uuid, ids: &[Uuid]) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM files WHERE owner_id = $1 AND id = ANY($2)")
            .bind(owner_id)
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

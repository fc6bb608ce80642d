use async_trait::async_trait;
use sqlx::query_as;
use uuid::Uuid;

use crate::{
    application::{
        dto::folder_dto::FolderDTO, error::ApplicationError,
        repositories::folder_repository::FolderRepository,
    },
    domain::models::folder::{Folder, FolderSummary, Parent},
};

pub struct PgFolderRepository {
    pool: sqlx::PgPool,
}

impl PgFolderRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn create_folder(&self, folder: FolderDTO) -> Result<Folder, ApplicationError> {
        let query = r#"
            INSERT INTO folders (id, name, owner_id, parent_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        "#;
        let created: FolderDTO = query_as::<_, FolderDTO>(query)
            .bind(folder.id)
            .bind(&folder.name)
            .bind(folder.owner_id)
            .bind(folder.parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(created.into())
    }

    async fn find_owned(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Folder>, ApplicationError> {
        let query = "SELECT * FROM folders WHERE id = $1 AND owner_id = $2";
        let fetched: Option<FolderDTO> = query_as::<_, FolderDTO>(query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched.map(Folder::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Folder>, ApplicationError> {
        let query = "SELECT * FROM folders WHERE id = $1";
        let fetched: Option<FolderDTO> = query_as::<_, FolderDTO>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(fetched.map(Folder::from))
    }

    async fn list_children(
        &self,
        owner_id: Uuid,
        parent: Parent,
    ) -> Result<Vec<FolderSummary>, ApplicationError> {
        let query = r#"
            SELECT f.*,
                (SELECT COUNT(*) FROM files WHERE files.folder_id = f.id) AS file_count,
                (SELECT COUNT(*) FROM folders c WHERE c.parent_id = f.id) AS child_count
            FROM folders f
            WHERE f.owner_id = $1 AND f.parent_id IS NOT DISTINCT FROM $2
            ORDER BY f.created_at DESC
        "#;
        let rows: Vec<FolderDTO> = query_as::<_, FolderDTO>(query)
            .bind(owner_id)
            .bind(parent.id())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(rows.into_iter().map(FolderSummary::from).collect())
    }

    async fn rename_folder(
        &self,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Folder>, ApplicationError> {
        let query = "UPDATE folders SET name = $1 WHERE id = $2 AND owner_id = $3 RETURNING *";
        let updated: Option<FolderDTO> = query_as::<_, FolderDTO>(query)
            .bind(name)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(updated.map(Folder::from))
    }

    async fn delete_folders(&self, owner_id: Uuid, ids: &[Uuid]) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM folders WHERE owner_id = $1 AND id = ANY($2)")
            .bind(owner_id)
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

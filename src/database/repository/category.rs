use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::category::{Category, CategoryPayload};

use super::RepoError;

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub async fn new() -> Result<Self, RepoError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// All categories, ordered by name then id for a stable listing
    pub async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<Category, RepoError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id, properties)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(payload.name.trim())
        .bind(payload.parent_id)
        .bind(Json(&payload.properties))
        .fetch_one(&self.pool)
        .await?;

        info!("Created category {} ({})", category.name, category.id);
        Ok(category)
    }

    pub async fn update(&self, id: Uuid, payload: &CategoryPayload) -> Result<Category, RepoError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, parent_id = $3, properties = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.trim())
        .bind(payload.parent_id)
        .bind(Json(&payload.properties))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound("Category"))?;

        Ok(category)
    }

    /// Delete a category. Succeeds even when products still reference it;
    /// the resolver tolerates the resulting dangling references.
    pub async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use std::collections::BTreeMap;

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::product::{derive_percentage, Product, ProductPayload};

use super::RepoError;

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub async fn new() -> Result<Self, RepoError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// All products, newest first
    pub async fn list(&self) -> Result<Vec<Product>, RepoError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, RepoError> {
        let percentage = derive_percentage(payload.price, payload.discount);

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (title, description, price, images, category_id, properties,
                 discount, percentage, top_selling)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(payload.title.trim())
        .bind(&payload.description)
        .bind(payload.price)
        .bind(Json(&payload.images))
        .bind(payload.category_id)
        .bind(Json(&payload.properties))
        .bind(payload.discount)
        .bind(percentage)
        .bind(payload.top_selling)
        .fetch_one(&self.pool)
        .await?;

        info!("Created product {} ({})", product.title, product.id);
        Ok(product)
    }

    /// Full-document replace of the mutable fields; `percentage` is recomputed
    pub async fn update(&self, id: Uuid, payload: &ProductPayload) -> Result<Product, RepoError> {
        let percentage = derive_percentage(payload.price, payload.discount);

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET title = $2, description = $3, price = $4, images = $5,
                category_id = $6, properties = $7, discount = $8,
                percentage = $9, top_selling = $10, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title.trim())
        .bind(&payload.description)
        .bind(payload.price)
        .bind(Json(&payload.images))
        .bind(payload.category_id)
        .bind(Json(&payload.properties))
        .bind(payload.discount)
        .bind(percentage)
        .bind(payload.top_selling)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound("Product"))?;

        Ok(product)
    }

    /// Persist a new property-value map produced by the binder's `set_value`
    pub async fn set_properties(
        &self,
        id: Uuid,
        properties: &BTreeMap<String, String>,
    ) -> Result<Product, RepoError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET properties = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(properties))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound("Product"))?;

        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

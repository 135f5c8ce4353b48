use axum::{extract::Path, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::catalog::{bind_properties, resolve_properties, set_value};
use crate::database::models::product::{Product, ProductPayload};
use crate::database::repository::{CategoryRepository, ProductRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/products - List products, newest first
pub async fn list() -> ApiResult<Vec<Product>> {
    let repository = ProductRepository::new().await?;
    let products = repository.list().await?;
    Ok(ApiResponse::success(products))
}

/// POST /api/products - Create a product
pub async fn create(Json(payload): Json<ProductPayload>) -> ApiResult<Product> {
    payload
        .validate()
        .map_err(|msg| ApiError::validation_error(msg, None))?;

    let repository = ProductRepository::new().await?;
    let product = repository.create(&payload).await?;
    Ok(ApiResponse::created(product))
}

/// GET /api/products/:id - Fetch a single product
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<Product> {
    let repository = ProductRepository::new().await?;
    let product = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::success(product))
}

/// PUT /api/products/:id - Replace the mutable fields of a product
pub async fn update(
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Product> {
    payload
        .validate()
        .map_err(|msg| ApiError::validation_error(msg, None))?;

    let repository = ProductRepository::new().await?;
    let product = repository.update(id, &payload).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /api/products/:id - Delete a product
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let repository = ProductRepository::new().await?;

    if !repository.delete(id).await? {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::success(json!({ "deleted": true })))
}

/// GET /api/products/:id/form - Fillable form state for a product
///
/// Resolves the product's category ancestry and binds the stored property
/// values onto the resolved list. Stored selections no longer present in a
/// property's allowed values are surfaced as-is; a deleted or missing
/// category yields an empty property list.
pub async fn form(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let products = ProductRepository::new().await?;
    let product = products
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    let categories = CategoryRepository::new().await?.list().await?;

    let resolved = product
        .category_id
        .map(|category_id| resolve_properties(category_id, &categories))
        .unwrap_or_default();
    let bound = bind_properties(&resolved, &product.properties);

    Ok(ApiResponse::success(json!({
        "product": product,
        "properties": bound,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SetPropertyPayload {
    pub name: String,
    pub value: String,
}

/// PATCH /api/products/:id/properties - Set one property value
///
/// Applies the binder's non-destructive update: every other stored entry,
/// including orphaned keys from an earlier category, is carried over.
pub async fn set_property(
    Path(id): Path<Uuid>,
    Json(payload): Json<SetPropertyPayload>,
) -> ApiResult<Product> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::bad_request("Property name is required"));
    }

    let repository = ProductRepository::new().await?;
    let product = repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    let updated = set_value(&product.properties, &payload.name, &payload.value);
    let product = repository.set_properties(id, &updated).await?;

    Ok(ApiResponse::success(product))
}

use std::collections::HashMap;

use axum::{
    extract::Path,
    Json,
};
use uuid::Uuid;

use crate::catalog::{resolve_properties, PropertyDefinition};
use crate::database::models::category::{CategoryPayload, CategoryWithParent};
use crate::database::repository::CategoryRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/categories - List categories with parent names populated
pub async fn list() -> ApiResult<Vec<CategoryWithParent>> {
    let repository = CategoryRepository::new().await?;
    let categories = repository.list().await?;

    // Parent names come from the same fetched set; dangling parents stay None
    let names_by_id: HashMap<Uuid, String> =
        categories.iter().map(|c| (c.id, c.name.clone())).collect();

    let listed = categories
        .into_iter()
        .map(|category| {
            let parent_name = category.parent_id.and_then(|pid| names_by_id.get(&pid).cloned());
            CategoryWithParent { category, parent_name }
        })
        .collect();

    Ok(ApiResponse::success(listed))
}

/// POST /api/categories - Create a category
pub async fn create(Json(payload): Json<CategoryPayload>) -> ApiResult<CategoryWithParent> {
    payload
        .validate()
        .map_err(|msg| ApiError::validation_error(msg, None))?;

    let repository = CategoryRepository::new().await?;
    let category = repository.create(&payload).await?;

    let parent_name = match category.parent_id {
        Some(pid) => repository.get(pid).await?.map(|parent| parent.name),
        None => None,
    };

    Ok(ApiResponse::created(CategoryWithParent { category, parent_name }))
}

/// PUT /api/categories/:id - Update a category
pub async fn update(
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> ApiResult<CategoryWithParent> {
    payload
        .validate()
        .map_err(|msg| ApiError::validation_error(msg, None))?;

    // A category may not be its own parent. Deeper cycles written through
    // multi-step edits are tolerated by the resolver rather than rejected.
    if payload.parent_id == Some(id) {
        return Err(ApiError::bad_request("A category cannot be its own parent"));
    }

    let repository = CategoryRepository::new().await?;
    let category = repository.update(id, &payload).await?;

    let parent_name = match category.parent_id {
        Some(pid) => repository.get(pid).await?.map(|parent| parent.name),
        None => None,
    };

    Ok(ApiResponse::success(CategoryWithParent { category, parent_name }))
}

/// DELETE /api/categories/:id - Delete a category
///
/// Succeeds even when products still reference the category; their stored
/// `category_id` goes dangling and the resolver treats it as no category.
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<serde_json::Value> {
    let repository = CategoryRepository::new().await?;

    if !repository.delete(id).await? {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(ApiResponse::success(serde_json::json!({ "deleted": true })))
}

/// GET /api/categories/:id/properties - Resolved property list for a category
///
/// Walks the parent chain; an unknown id resolves to an empty list rather
/// than an error.
pub async fn properties(Path(id): Path<Uuid>) -> ApiResult<Vec<PropertyDefinition>> {
    let repository = CategoryRepository::new().await?;
    let categories = repository.list().await?;

    Ok(ApiResponse::success(resolve_properties(id, &categories)))
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::catalog::PropertyDefinition;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    #[sqlx(json)]
    pub properties: Vec<PropertyDefinition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category list entry with the parent's display name populated in-memory
/// from the same fetched set.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithParent {
    #[serde(flatten)]
    pub category: Category,
    pub parent_name: Option<String>,
}

/// Body for category create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl CategoryPayload {
    /// Validate the submitted document: non-empty name, non-empty property
    /// names unique within the list. Returns the field in violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Category name is required".to_string());
        }

        let mut names: HashSet<&str> = HashSet::new();
        for def in &self.properties {
            if def.name.trim().is_empty() {
                return Err("Property name is required".to_string());
            }
            if !names.insert(def.name.as_str()) {
                return Err(format!("Duplicate property name: {}", def.name));
            }
        }

        Ok(())
    }
}

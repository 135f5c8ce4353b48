use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PropertyDefinition;

/// One fillable form input: a resolved property plus the product's current
/// selection for it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundProperty {
    pub name: String,
    pub values: Vec<String>,
    pub selected_value: Option<String>,
}

/// Join the resolved property list with a product's stored value map.
///
/// Keeps resolver order. A stored value is surfaced even when it is no longer
/// a member of `values` (the category definition may have changed since the
/// product was saved); stored keys with no matching resolved property are
/// simply not rendered. Never fails.
pub fn bind_properties(
    resolved: &[PropertyDefinition],
    stored_values: &BTreeMap<String, String>,
) -> Vec<BoundProperty> {
    resolved
        .iter()
        .map(|def| BoundProperty {
            name: def.name.clone(),
            values: def.values.clone(),
            selected_value: stored_values.get(&def.name).cloned(),
        })
        .collect()
}

/// Return a copy of the stored value map with one property set.
///
/// Every other entry is carried over untouched, including orphaned keys that
/// belong to a different category context. Editing one property must never
/// silently drop unrelated stored properties.
pub fn set_value(
    stored_values: &BTreeMap<String, String>,
    name: &str,
    value: &str,
) -> BTreeMap<String, String> {
    let mut updated = stored_values.clone();
    updated.insert(name.to_string(), value.to_string());
    updated
}

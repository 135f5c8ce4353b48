use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::database::models::category::Category;

use super::PropertyDefinition;

/// Compute the ordered, deduplicated property list for a category by walking
/// its parent chain.
///
/// Order is leaf-first: the category's own properties in declared order, then
/// each ancestor's, skipping any name already collected (the definition
/// closest to the leaf wins). Malformed data degrades instead of failing:
///
/// - unknown `category_id` resolves to an empty list (the category may have
///   been deleted out from under a product);
/// - a dangling `parent_id` stops the walk with whatever was collected;
/// - a cycle in the parent relation stops the walk at the first revisit.
///
/// Pure over its inputs; output depends only on the parent chain and declared
/// property order, never on slice or map iteration order.
pub fn resolve_properties(category_id: Uuid, categories: &[Category]) -> Vec<PropertyDefinition> {
    let by_id: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut resolved: Vec<PropertyDefinition> = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut visited: HashSet<Uuid> = HashSet::new();

    let mut current = by_id.get(&category_id).copied();
    while let Some(category) = current {
        if !visited.insert(category.id) {
            tracing::debug!("category parent chain revisited {}, stopping", category.id);
            break;
        }

        for def in category.properties.iter() {
            if seen_names.insert(def.name.as_str()) {
                resolved.push(def.clone());
            }
        }

        current = category.parent_id.and_then(|pid| by_id.get(&pid).copied());
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: Uuid, parent_id: Option<Uuid>, properties: Vec<PropertyDefinition>) -> Category {
        let now = Utc::now();
        Category {
            id,
            name: format!("cat-{}", id),
            parent_id,
            properties,
            created_at: now,
            updated_at: now,
        }
    }

    fn prop(name: &str, values: &[&str]) -> PropertyDefinition {
        PropertyDefinition::new(name, values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn unknown_category_resolves_empty() {
        let cats = vec![category(Uuid::new_v4(), None, vec![prop("color", &["red"])])];
        assert!(resolve_properties(Uuid::new_v4(), &cats).is_empty());
    }

    #[test]
    fn merges_parent_chain_nearest_first() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cats = vec![
            category(a, None, vec![prop("color", &["red", "blue"])]),
            category(b, Some(a), vec![prop("size", &["S", "M"])]),
        ];

        let resolved = resolve_properties(b, &cats);
        assert_eq!(resolved, vec![prop("size", &["S", "M"]), prop("color", &["red", "blue"])]);
    }

    #[test]
    fn descendant_definition_wins_over_ancestor() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cats = vec![
            category(a, None, vec![prop("color", &["red", "blue"])]),
            category(b, Some(a), vec![prop("color", &["green"]), prop("size", &["S", "M"])]),
        ];

        let resolved = resolve_properties(b, &cats);
        assert_eq!(resolved, vec![prop("color", &["green"]), prop("size", &["S", "M"])]);
    }

    #[test]
    fn cycle_terminates_without_duplicates() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cats = vec![
            category(a, Some(b), vec![prop("color", &["red"])]),
            category(b, Some(a), vec![prop("size", &["S"])]),
        ];

        let resolved = resolve_properties(a, &cats);
        assert_eq!(resolved, vec![prop("color", &["red"]), prop("size", &["S"])]);
    }

    #[test]
    fn self_parent_yields_own_properties_once() {
        let a = Uuid::new_v4();
        let cats = vec![category(a, Some(a), vec![prop("color", &["red"])])];

        let resolved = resolve_properties(a, &cats);
        assert_eq!(resolved, vec![prop("color", &["red"])]);
    }

    #[test]
    fn dangling_parent_stops_with_partial_result() {
        let a = Uuid::new_v4();
        let cats = vec![category(a, Some(Uuid::new_v4()), vec![prop("color", &["red"])])];

        let resolved = resolve_properties(a, &cats);
        assert_eq!(resolved, vec![prop("color", &["red"])]);
    }

    #[test]
    fn deep_chain_preserves_leaf_to_root_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let cats = vec![
            category(a, None, vec![prop("material", &["cotton"]), prop("fit", &["slim"])]),
            category(b, Some(a), vec![prop("size", &["S"])]),
            category(c, Some(b), vec![prop("color", &["red"])]),
        ];

        let resolved = resolve_properties(c, &cats);
        let names: Vec<&str> = resolved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["color", "size", "material", "fit"]);
    }

    #[test]
    fn property_names_are_case_sensitive() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cats = vec![
            category(a, None, vec![prop("Color", &["red"])]),
            category(b, Some(a), vec![prop("color", &["green"])]),
        ];

        let resolved = resolve_properties(b, &cats);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let cats = vec![
            category(a, None, vec![prop("color", &["red"]), prop("size", &["S"])]),
            category(b, Some(a), vec![prop("trim", &["gold"])]),
        ];

        let first = resolve_properties(b, &cats);
        for _ in 0..10 {
            assert_eq!(resolve_properties(b, &cats), first);
        }
    }
}

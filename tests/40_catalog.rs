// Catalog behavior exercised through the public library surface: the
// resolver/binder pipeline the product form endpoint runs on every load.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use storefront_api::catalog::{bind_properties, resolve_properties, set_value, PropertyDefinition};
use storefront_api::database::models::category::Category;

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
fn forest_resolution_with_descendant_precedence() {
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
fn cyclic_parents_terminate() {
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
fn unknown_category_resolves_to_nothing() {
    let cats = vec![category(Uuid::new_v4(), None, vec![prop("color", &["red"])])];
    assert!(resolve_properties(Uuid::new_v4(), &cats).is_empty());
}

#[test]
fn resolution_is_idempotent() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let cats = vec![
        category(a, None, vec![prop("material", &["cotton", "wool"])]),
        category(b, Some(a), vec![prop("size", &["S", "M", "L"])]),
    ];

    let first = resolve_properties(b, &cats);
    let second = resolve_properties(b, &cats);
    assert_eq!(first, second);
}

#[test]
fn binder_round_trip_preserves_unrelated_keys() {
    let resolved = vec![prop("color", &["red", "blue"])];
    let mut stored = BTreeMap::new();
    stored.insert("color".to_string(), "red".to_string());
    stored.insert("legacyProp".to_string(), "x".to_string());

    let bound = bind_properties(&resolved, &stored);
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].selected_value.as_deref(), Some("red"));

    let updated = set_value(&stored, "color", "blue");
    assert_eq!(updated.get("legacyProp").map(String::as_str), Some("x"));

    let rebound = bind_properties(&resolved, &updated);
    assert_eq!(rebound[0].selected_value.as_deref(), Some("blue"));
}

#[test]
fn stale_selection_is_tolerated() {
    let resolved = vec![prop("color", &["red", "blue"])];
    let mut stored = BTreeMap::new();
    stored.insert("color".to_string(), "purple".to_string());

    let bound = bind_properties(&resolved, &stored);
    assert_eq!(bound[0].selected_value.as_deref(), Some("purple"));
}

#[test]
fn full_form_pipeline_over_an_ancestry() {
    // Clothing <- Shirts, product stored against Shirts with one stale and
    // one orphaned selection
    let clothing = Uuid::new_v4();
    let shirts = Uuid::new_v4();
    let cats = vec![
        category(clothing, None, vec![prop("material", &["cotton", "wool"])]),
        category(shirts, Some(clothing), vec![prop("color", &["red", "blue"]), prop("size", &["S", "M"])]),
    ];

    let mut stored = BTreeMap::new();
    stored.insert("color".to_string(), "magenta".to_string()); // stale
    stored.insert("obsolete".to_string(), "yes".to_string()); // orphaned

    let resolved = resolve_properties(shirts, &cats);
    let bound = bind_properties(&resolved, &stored);

    let names: Vec<&str> = bound.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["color", "size", "material"]);
    assert_eq!(bound[0].selected_value.as_deref(), Some("magenta"));
    assert_eq!(bound[1].selected_value, None);
    assert_eq!(bound[2].selected_value, None);
}

pub mod binder;
pub mod resolver;

use serde::{Deserialize, Serialize};

pub use binder::{bind_properties, set_value, BoundProperty};
pub use resolver::resolve_properties;

/// A named property a category offers, with its allowed values.
///
/// Stored verbatim inside the category document; `values` keeps the order
/// (and any duplicates) the admin entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub values: Vec<String>,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self { name: name.into(), values }
    }
}

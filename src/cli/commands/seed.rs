use std::collections::BTreeMap;

use serde_json::json;

use crate::catalog::PropertyDefinition;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::category::CategoryPayload;
use crate::database::models::product::ProductPayload;
use crate::database::repository::{CategoryRepository, ProductRepository};

/// `storefront seed` - create a small demo catalog through the repositories.
///
/// Builds a two-level category chain so the property resolver has an
/// ancestry to walk, plus a couple of products bound to it.
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let categories = CategoryRepository::new().await?;
    let products = ProductRepository::new().await?;

    let clothing = categories
        .create(&CategoryPayload {
            name: "Clothing".to_string(),
            parent_id: None,
            properties: vec![PropertyDefinition::new(
                "material",
                vec!["cotton".to_string(), "wool".to_string(), "polyester".to_string()],
            )],
        })
        .await?;

    let shirts = categories
        .create(&CategoryPayload {
            name: "Shirts".to_string(),
            parent_id: Some(clothing.id),
            properties: vec![
                PropertyDefinition::new("color", vec!["red".to_string(), "blue".to_string(), "black".to_string()]),
                PropertyDefinition::new("size", vec!["S".to_string(), "M".to_string(), "L".to_string()]),
            ],
        })
        .await?;

    let mut properties = BTreeMap::new();
    properties.insert("color".to_string(), "blue".to_string());
    properties.insert("size".to_string(), "M".to_string());
    properties.insert("material".to_string(), "cotton".to_string());

    let shirt = products
        .create(&ProductPayload {
            title: "Oxford Shirt".to_string(),
            description: Some("Classic button-down oxford".to_string()),
            price: "49.99".parse()?,
            images: vec![],
            category_id: Some(shirts.id),
            properties,
            discount: Some("39.99".parse()?),
            top_selling: true,
        })
        .await?;

    let tee = products
        .create(&ProductPayload {
            title: "Plain Tee".to_string(),
            description: None,
            price: "14.99".parse()?,
            images: vec![],
            category_id: Some(shirts.id),
            properties: BTreeMap::new(),
            discount: None,
            top_selling: false,
        })
        .await?;

    output_success(
        &output_format,
        "Seeded demo catalog",
        Some(json!({
            "categories": [clothing.id, shirts.id],
            "products": [shirt.id, tee.id],
        })),
    )
}

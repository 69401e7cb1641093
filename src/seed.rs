//! Catalog bootstrap - Populates categories and products from a seed dataset.
//!
//! Seeding is get-or-create by slug and therefore idempotent: rows that
//! already exist are left untouched, so the routine is safe to run on every
//! startup. The dataset comes from `catalog.toml` when present, otherwise
//! from the built-in fixture.

use crate::{
    config::catalog::{CatalogConfig, CategoryConfig, ProductConfig},
    core::catalog::{NewProduct, create_category, create_product},
    entities::{Category, Product, category, product},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::prelude::*;
use std::collections::HashMap;
use tracing::info;

/// Seeds the catalog stores from the given dataset.
///
/// Categories are created first so products can resolve their owning
/// category by slug. Returns the number of rows actually created.
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &CatalogConfig) -> Result<usize> {
    let mut created = 0;

    let mut category_ids: HashMap<String, i64> = HashMap::new();
    for entry in &catalog.categories {
        let id = seed_category(db, entry, &mut created).await?;
        category_ids.insert(entry.slug.clone(), id);
    }

    for entry in &catalog.products {
        seed_product(db, entry, &category_ids, &mut created).await?;
    }

    info!(created, "catalog seeding finished");
    Ok(created)
}

async fn seed_category(
    db: &DatabaseConnection,
    entry: &CategoryConfig,
    created: &mut usize,
) -> Result<i64> {
    let existing = Category::find()
        .filter(category::Column::Slug.eq(entry.slug.clone()))
        .one(db)
        .await?;
    if let Some(found) = existing {
        return Ok(found.id);
    }

    let fresh = create_category(db, &entry.name, &entry.slug, entry.description.clone()).await?;
    info!(category = %fresh.name, "seeded category");
    *created += 1;
    Ok(fresh.id)
}

async fn seed_product(
    db: &DatabaseConnection,
    entry: &ProductConfig,
    category_ids: &HashMap<String, i64>,
    created: &mut usize,
) -> Result<()> {
    let existing = Product::find()
        .filter(product::Column::Slug.eq(entry.slug.clone()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let category_id = match category_ids.get(&entry.category) {
        Some(id) => *id,
        // A product may reference a category that predates this dataset
        None => {
            crate::core::catalog::get_category_by_slug(db, &entry.category)
                .await?
                .id
        }
    };

    let fresh = create_product(
        db,
        NewProduct {
            name: entry.name.clone(),
            slug: entry.slug.clone(),
            category_id,
            description: entry.description.clone(),
            price: entry.price,
            unit: entry.unit,
            stock_quantity: entry.stock_quantity,
            is_featured: entry.is_featured,
            origin: entry.origin.clone(),
        },
    )
    .await?;
    info!(product = %fresh.name, price = %fresh.price, "seeded product");
    *created += 1;
    Ok(())
}

/// The built-in fixture used when no `catalog.toml` is present: a small
/// fresh-produce assortment with VND prices.
#[must_use]
pub fn default_catalog() -> CatalogConfig {
    let categories = vec![
        category_entry("Leafy greens", "leafy-greens", "Fresh leafy vegetables"),
        category_entry("Roots and tubers", "roots", "Root vegetables and tubers"),
        category_entry("Mushrooms", "mushrooms", "Fresh edible mushrooms"),
        category_entry("Herbs", "herbs", "Aromatic fresh herbs"),
        category_entry("Fruit", "fruit", "Seasonal fresh fruit"),
    ];

    let products = vec![
        ProductConfig {
            name: "Water spinach".to_string(),
            slug: "water-spinach".to_string(),
            category: "leafy-greens".to_string(),
            description: "Fresh water spinach, rich in vitamins A and C.".to_string(),
            price: Decimal::from(25000),
            unit: product::Unit::Kilogram,
            stock_quantity: 50,
            is_featured: true,
            origin: Some("Da Lat".to_string()),
        },
        ProductConfig {
            name: "Baby bok choy".to_string(),
            slug: "baby-bok-choy".to_string(),
            category: "leafy-greens".to_string(),
            description: "Tender baby bok choy, sweet and crisp.".to_string(),
            price: Decimal::from(30000),
            unit: product::Unit::Kilogram,
            stock_quantity: 40,
            is_featured: false,
            origin: Some("Da Lat".to_string()),
        },
        ProductConfig {
            name: "Carrot".to_string(),
            slug: "carrot".to_string(),
            category: "roots".to_string(),
            description: "Sweet crunchy carrots.".to_string(),
            price: Decimal::from(18000),
            unit: product::Unit::Kilogram,
            stock_quantity: 60,
            is_featured: false,
            origin: None,
        },
        ProductConfig {
            name: "Potato".to_string(),
            slug: "potato".to_string(),
            category: "roots".to_string(),
            description: "All-purpose potatoes.".to_string(),
            price: Decimal::from(15000),
            unit: product::Unit::Kilogram,
            stock_quantity: 80,
            is_featured: false,
            origin: None,
        },
        ProductConfig {
            name: "Straw mushroom".to_string(),
            slug: "straw-mushroom".to_string(),
            category: "mushrooms".to_string(),
            description: "Fresh straw mushrooms for soups and stir-fries.".to_string(),
            price: Decimal::from(32000),
            unit: product::Unit::Pack,
            stock_quantity: 25,
            is_featured: true,
            origin: None,
        },
        ProductConfig {
            name: "Coriander".to_string(),
            slug: "coriander".to_string(),
            category: "herbs".to_string(),
            description: "Fragrant coriander bundles.".to_string(),
            price: Decimal::from(8000),
            unit: product::Unit::Bundle,
            stock_quantity: 35,
            is_featured: false,
            origin: None,
        },
        ProductConfig {
            name: "King orange".to_string(),
            slug: "king-orange".to_string(),
            category: "fruit".to_string(),
            description: "Juicy king oranges, rich in vitamin C.".to_string(),
            price: Decimal::from(45000),
            unit: product::Unit::Kilogram,
            stock_quantity: 30,
            is_featured: true,
            origin: Some("Mekong Delta".to_string()),
        },
    ];

    CatalogConfig {
        categories,
        products,
    }
}

fn category_entry(name: &str, slug: &str, description: &str) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
    }
}

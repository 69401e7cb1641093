//! Shared test utilities for `Greengrocer`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::cart::CartIdentity,
    core::catalog::{self, ListingUpdate, NewProduct},
    core::checkout::CheckoutDetails,
    entities,
    entities::product::Unit,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test category, deriving the slug from the name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    let slug = name.to_lowercase().replace(' ', "-");
    catalog::create_category(db, name, &slug, None).await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `price`: 25000 (VND)
/// * `unit`: kilogram
/// * `stock_quantity`: 10
/// * available, not featured
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, Decimal::from(25000), category_id, true).await
}

/// Creates a test product with a custom price and availability.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    category_id: i64,
    is_available: bool,
) -> Result<entities::product::Model> {
    let slug = name.to_lowercase().replace(' ', "-");
    let created = catalog::create_product(
        db,
        NewProduct {
            name: name.to_string(),
            slug,
            category_id,
            description: format!("{name} for testing"),
            price,
            unit: Unit::Kilogram,
            stock_quantity: 10,
            is_featured: false,
            origin: None,
        },
    )
    .await?;

    if is_available {
        return Ok(created);
    }
    catalog::update_product_listing(
        db,
        created.id,
        ListingUpdate {
            is_available: Some(false),
            ..Default::default()
        },
    )
    .await
}

/// The anonymous-session identity used by most cart tests.
#[must_use]
pub fn session_identity() -> CartIdentity {
    CartIdentity::Session("test-session".to_string())
}

/// Valid checkout details with all required fields filled in.
#[must_use]
pub fn sample_checkout_details() -> CheckoutDetails {
    CheckoutDetails {
        customer_name: "Nguyen Van A".to_string(),
        customer_phone: "0900000000".to_string(),
        customer_email: Some("a@example.com".to_string()),
        delivery_address: "123 Str".to_string(),
        notes: None,
    }
}

/// Sets up a complete test environment with a category and one available
/// product. Returns (db, category, product) for common cart scenarios.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Test Category").await?;
    let item = create_test_product(&db, "Test Product", category.id).await?;
    Ok((db, category, item))
}

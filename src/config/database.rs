//! Database configuration module for `Greengrocer`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to generate SQL from the entity models, so
//! the database schema always matches the Rust struct definitions without manual SQL.

use crate::entities::{Cart, CartItem, Category, Order, OrderItem, Product, cart_item};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/greengrocer.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// Creates tables for categories, products, carts, cart items, orders, and order items,
/// plus the composite unique index that guarantees at most one cart line per
/// `(cart, product)` pair.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut category_table = schema.create_table_from_entity(Category);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut cart_table = schema.create_table_from_entity(Cart);
    let mut cart_item_table = schema.create_table_from_entity(CartItem);
    let mut order_table = schema.create_table_from_entity(Order);
    let mut order_item_table = schema.create_table_from_entity(OrderItem);

    // Bootstrap runs on every startup, so creation must be re-runnable
    db.execute(builder.build(category_table.if_not_exists()))
        .await?;
    db.execute(builder.build(product_table.if_not_exists()))
        .await?;
    db.execute(builder.build(cart_table.if_not_exists())).await?;
    db.execute(builder.build(cart_item_table.if_not_exists()))
        .await?;
    db.execute(builder.build(order_table.if_not_exists())).await?;
    db.execute(builder.build(order_item_table.if_not_exists()))
        .await?;

    // Entity attributes cannot express a composite unique constraint
    let mut cart_line_unique = Index::create()
        .name("uniq_cart_items_cart_product")
        .table(cart_item::Entity)
        .col(cart_item::Column::CartId)
        .col(cart_item::Column::ProductId)
        .unique()
        .to_owned();
    db.execute(builder.build(cart_line_unique.if_not_exists()))
        .await?;

    Ok(())
}

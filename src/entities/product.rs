//! Product entity - A catalog item quoted per unit of sale.
//!
//! Prices are decimal (currency precision) and always quoted per `unit`.
//! `stock_quantity` is advisory only; no flow in the storefront decrements
//! it. Visibility is controlled by `is_available`, promotion by `is_featured`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit of sale a product's price is quoted against
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Priced per kilogram
    #[sea_orm(string_value = "kg")]
    #[serde(rename = "kg")]
    Kilogram,
    /// Priced per gram
    #[sea_orm(string_value = "g")]
    #[serde(rename = "g")]
    Gram,
    /// Priced per piece
    #[sea_orm(string_value = "piece")]
    Piece,
    /// Priced per bundle
    #[sea_orm(string_value = "bundle")]
    Bundle,
    /// Priced per pack
    #[sea_orm(string_value = "pack")]
    Pack,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product
    pub name: String,
    /// URL-stable identifier, unique across products
    #[sea_orm(unique)]
    pub slug: String,
    /// ID of the category this product belongs to
    pub category_id: i64,
    /// Free-text description
    pub description: String,
    /// Price per `unit`, in currency precision
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Unit of sale the price is quoted against
    pub unit: Unit,
    /// Optional path to a product image
    pub image: Option<String>,
    /// Advisory stock level; never decremented by storefront flows
    pub stock_quantity: i32,
    /// Whether the product is visible and purchasable
    pub is_available: bool,
    /// Whether the product is promoted on the home page
    pub is_featured: bool,
    /// Optional region of origin
    pub origin: Option<String>,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    /// One product is referenced by many cart lines
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

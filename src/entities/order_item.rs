//! Order item entity - A snapshotted line of a completed checkout.
//!
//! The product's price, name, and unit are copied onto the line at checkout
//! time, so later catalog edits never change what an order records. The
//! product reference is nullable and set to NULL on product deletion instead
//! of cascading, which keeps order history intact when the catalog shrinks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::product::Unit;

/// Order line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning order
    pub order_id: i64,
    /// Reference to the live product, cleared if the product is deleted
    pub product_id: Option<i64>,
    /// Product name as it was at checkout
    pub product_name: String,
    /// Unit of sale as it was at checkout
    pub unit: Unit,
    /// Number of units ordered
    pub quantity: i32,
    /// Price per unit as it was at checkout
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order; removed with it
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    /// Loose reference to the live product; cleared on product deletion so
    /// order history survives catalog edits
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "SetNull"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Cart item entity - A (product, quantity) line inside a cart.
//!
//! The `(cart_id, product_id)` pair is unique: repeated adds merge into the
//! existing line. A line never stores a price of its own; line totals are
//! always computed live from the current product price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owning cart
    pub cart_id: i64,
    /// ID of the product this line refers to
    pub product_id: i64,
    /// Positive number of units; a line reduced to zero is deleted instead
    pub quantity: i32,
    /// When the line was first added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between CartItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one cart; removed with it
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id",
        on_delete = "Cascade"
    )]
    Cart,
    /// Each line refers to one live product; a cart line for a deleted
    /// product is meaningless, so the reference cascades
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

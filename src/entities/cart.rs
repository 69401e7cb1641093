//! Cart entity - Per-identity collection of pending purchase intentions.
//!
//! A cart is keyed by exactly one of an authenticated user id or an anonymous
//! session key. Both columns carry unique constraints so two concurrent
//! first-touches for the same identity cannot create two carts. The row is
//! created lazily and never deleted; checkout clears its line items only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    /// Unique identifier for the cart
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Authenticated user id, if this cart belongs to a logged-in customer
    #[sea_orm(unique)]
    pub user_id: Option<i64>,
    /// Anonymous session key, if this cart belongs to a guest visitor
    #[sea_orm(unique)]
    pub session_key: Option<String>,
    /// When the cart was created
    pub created_at: DateTimeUtc,
    /// When the cart was last touched
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Cart and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cart owns many line items
    #[sea_orm(has_many = "super::cart_item::Entity")]
    Items,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

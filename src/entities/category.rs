//! Category entity - Groups products for browsing.
//!
//! Each category has a display name and a URL-stable slug. Deleting a
//! category cascades to its products (administrative operation only).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display label (e.g., "Leafy greens", "Mushrooms")
    pub name: String,
    /// URL-stable identifier, unique across categories
    #[sea_orm(unique)]
    pub slug: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Optional path to a category image
    pub image: Option<String>,
    /// When the category was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

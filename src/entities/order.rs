//! Order entity - An immutable record of a completed checkout.
//!
//! Created exactly once per checkout with the customer's delivery details and
//! a total captured at creation time; the total is never recomputed. Only
//! `status` and `notes` change afterwards, through the administrative surface.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fulfilment status of an order.
///
/// Statuses advance along the chain pending, confirmed, preparing, shipped,
/// delivered; `Cancelled` is reachable from any non-terminal state. Delivered
/// and cancelled orders are frozen.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed but not yet acknowledged
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Acknowledged by the shop
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Being picked and packed
    #[sea_orm(string_value = "preparing")]
    Preparing,
    /// Out for delivery
    #[sea_orm(string_value = "shipped")]
    Shipped,
    /// Delivered to the customer; terminal
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Cancelled before delivery; terminal
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    const fn step(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Whether an order in this status may move to `next`.
    ///
    /// Only the immediate next step in the fulfilment chain is allowed,
    /// plus cancellation from any non-terminal state.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Cancelled {
            return true;
        }
        self.step() == Some(next)
    }
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the customer placing the order
    pub customer_name: String,
    /// Contact phone number
    pub customer_phone: String,
    /// Optional contact email
    pub customer_email: Option<String>,
    /// Address the order is delivered to
    pub delivery_address: String,
    /// Current fulfilment status
    pub status: OrderStatus,
    /// Total captured at checkout; never recomputed afterwards
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    /// Optional free-text notes from the customer
    pub notes: Option<String>,
    /// When the order was placed
    pub created_at: DateTimeUtc,
    /// When the order was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order owns many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

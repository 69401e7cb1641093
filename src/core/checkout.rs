//! Checkout business logic - Atomic conversion of a cart into an order.
//!
//! Checkout validates the delivery details and the non-empty-cart
//! precondition, then runs one database transaction: compute the live total,
//! insert the order, copy each cart line into an order line with the
//! product's current price, name, and unit snapshotted, and clear the cart.
//! Any failure rolls the whole unit back, leaving the cart intact so the
//! customer can retry without duplicate partial orders.

use crate::{
    core::cart::{self, CartIdentity},
    entities::{CartItem, Order, OrderItem, cart_item, order, order_item},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// Customer and delivery fields captured onto an order at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    /// Name of the customer; required
    pub customer_name: String,
    /// Contact phone number; required
    pub customer_phone: String,
    /// Optional contact email
    pub customer_email: Option<String>,
    /// Delivery address; required
    pub delivery_address: String,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl CheckoutDetails {
    /// Validates that every required field is present and non-blank.
    fn validate(&self) -> Result<()> {
        let required: [(&'static str, &str); 3] = [
            ("customer_name", &self.customer_name),
            ("customer_phone", &self.customer_phone),
            ("delivery_address", &self.delivery_address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::MissingField { field });
            }
        }
        Ok(())
    }
}

/// Converts the caller's cart into a persisted order.
///
/// Fails with [`Error::EmptyCart`] before creating anything if the cart has
/// no line items. Steps 2-4 of the conversion (order insert, order-line
/// inserts, cart clearing) are one all-or-nothing transaction.
pub async fn place_order(
    db: &DatabaseConnection,
    identity: &CartIdentity,
    details: &CheckoutDetails,
) -> Result<order::Model> {
    details.validate()?;

    let shopping_cart = cart::resolve_cart(db, identity).await?;

    let txn = db.begin().await?;

    let lines = cart::get_cart_items(&txn, shopping_cart.id).await?;
    if lines.is_empty() {
        return Err(Error::EmptyCart);
    }

    let total_amount: Decimal = lines
        .iter()
        .map(|(line, item)| Decimal::from(line.quantity) * item.price)
        .sum();

    let now = chrono::Utc::now();
    let placed = order::ActiveModel {
        customer_name: Set(details.customer_name.trim().to_string()),
        customer_phone: Set(details.customer_phone.trim().to_string()),
        customer_email: Set(details.customer_email.clone()),
        delivery_address: Set(details.delivery_address.trim().to_string()),
        status: Set(order::OrderStatus::Pending),
        total_amount: Set(total_amount),
        notes: Set(details.notes.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (line, item) in &lines {
        // Snapshot the current price, name, and unit onto the order line
        order_item::ActiveModel {
            order_id: Set(placed.id),
            product_id: Set(Some(item.id)),
            product_name: Set(item.name.clone()),
            unit: Set(item.unit),
            quantity: Set(line.quantity),
            price: Set(item.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    // The cart row itself survives for reuse
    CartItem::delete_many()
        .filter(cart_item::Column::CartId.eq(shopping_cart.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(order_id = placed.id, %total_amount, "order placed");
    Ok(placed)
}

/// Retrieves an order together with its line items, for the confirmation view.
pub async fn get_order_with_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<(order::Model, Vec<order_item::Model>)> {
    let placed = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    let lines = placed.find_related(OrderItem).all(db).await?;
    Ok((placed, lines))
}

//! Cart business logic - Resolution and mutation of per-identity carts.
//!
//! A caller identity (authenticated user id or anonymous session key) is
//! passed explicitly into every operation; there is no ambient session state.
//! Adding a product that already has a line merges by incrementing quantity,
//! updating a line replaces its quantity, and a quantity at or below zero
//! deletes the line. Totals are always computed live from current product
//! prices using decimal arithmetic.

use crate::{
    entities::{Cart, CartItem, Product, cart, cart_item, product},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Set, SqlErr, prelude::*};
use serde::Serialize;
use std::fmt;

/// The identity a cart is keyed by, supplied by the session provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIdentity {
    /// An authenticated customer
    User(i64),
    /// An anonymous visitor identified by a server-issued session key
    Session(String),
}

impl fmt::Display for CartIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::Session(key) => write!(f, "session:{key}"),
        }
    }
}

/// Live cart totals, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities across all lines
    pub total_items: i64,
    /// Sum of `quantity x current product price` across all lines
    pub total_price: Decimal,
}

/// Structured response returned by cart mutation operations, for callers
/// that want a payload instead of a page navigation.
#[derive(Debug, Clone, Serialize)]
pub struct CartMutation {
    /// Whether the mutation succeeded (failures are reported as errors, so
    /// this is always true on the success path)
    pub success: bool,
    /// Human-readable confirmation message
    pub message: String,
    /// Cart total item count after the mutation
    pub cart_total_items: i64,
    /// Cart total price after the mutation
    pub cart_total_price: Decimal,
}

impl CartMutation {
    fn new(message: String, summary: CartSummary) -> Self {
        Self {
            success: true,
            message,
            cart_total_items: summary.total_items,
            cart_total_price: summary.total_price,
        }
    }
}

/// Validates a raw quantity input at the boundary.
///
/// An absent value defaults to 1. Anything present must parse as a positive
/// integer; non-numeric or non-positive input is a validation error, never a
/// silent default.
pub fn parse_quantity(raw: Option<&str>) -> Result<i32> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    let trimmed = raw.trim();
    let quantity: i32 = trimmed.parse().map_err(|_| Error::InvalidQuantity {
        raw: trimmed.to_string(),
    })?;
    if quantity <= 0 {
        return Err(Error::InvalidQuantity {
            raw: trimmed.to_string(),
        });
    }
    Ok(quantity)
}

async fn find_cart<C>(db: &C, identity: &CartIdentity) -> Result<Option<cart::Model>>
where
    C: ConnectionTrait,
{
    let query = match identity {
        CartIdentity::User(id) => Cart::find().filter(cart::Column::UserId.eq(*id)),
        CartIdentity::Session(key) => Cart::find().filter(cart::Column::SessionKey.eq(key.clone())),
    };
    query.one(db).await.map_err(Into::into)
}

/// Returns the caller's single cart, creating an empty one if none exists.
///
/// Idempotent: repeated calls for the same identity return the same cart.
/// Creation is create-or-fetch, not check-then-create: if the insert loses
/// the uniqueness race to a concurrent first-touch, the winner's row is
/// fetched and returned instead.
pub async fn resolve_cart(db: &DatabaseConnection, identity: &CartIdentity) -> Result<cart::Model> {
    if let Some(existing) = find_cart(db, identity).await? {
        return Ok(existing);
    }

    let (user_id, session_key) = match identity {
        CartIdentity::User(id) => (Some(*id), None),
        CartIdentity::Session(key) => (None, Some(key.clone())),
    };
    let now = chrono::Utc::now();
    let fresh = cart::ActiveModel {
        user_id: Set(user_id),
        session_key: Set(session_key),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match fresh.insert(db).await {
        Ok(created) => Ok(created),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            find_cart(db, identity)
                .await?
                .ok_or_else(|| Error::CartConflict {
                    identity: identity.to_string(),
                })
        }
        Err(err) => Err(err.into()),
    }
}

/// Adds a product to the caller's cart, merging with any existing line.
///
/// The product must exist and be available; the quantity must be positive.
/// If the cart already holds a line for this product, its quantity is
/// incremented by the requested amount, otherwise a new line is created.
pub async fn add_item(
    db: &DatabaseConnection,
    identity: &CartIdentity,
    product_id: i64,
    quantity: i32,
) -> Result<CartMutation> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity {
            raw: quantity.to_string(),
        });
    }

    let item = Product::find_by_id(product_id)
        .filter(product::Column::IsAvailable.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;

    let shopping_cart = resolve_cart(db, identity).await?;

    let existing = CartItem::find()
        .filter(cart_item::Column::CartId.eq(shopping_cart.id))
        .filter(cart_item::Column::ProductId.eq(product_id))
        .one(db)
        .await?;

    match existing {
        Some(line) => {
            let merged =
                line.quantity
                    .checked_add(quantity)
                    .ok_or_else(|| Error::InvalidQuantity {
                        raw: quantity.to_string(),
                    })?;
            let mut line: cart_item::ActiveModel = line.into();
            line.quantity = Set(merged);
            line.update(db).await?;
        }
        None => {
            let line = cart_item::ActiveModel {
                cart_id: Set(shopping_cart.id),
                product_id: Set(product_id),
                quantity: Set(quantity),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            line.insert(db).await?;
        }
    }

    touch_cart(db, shopping_cart.clone()).await?;
    let summary = cart_summary(db, shopping_cart.id).await?;
    Ok(CartMutation::new(
        format!("Added {} to cart", item.name),
        summary,
    ))
}

/// Replaces the quantity of a line in the caller's cart.
///
/// The line must belong to the caller's cart; a foreign or unknown id fails
/// with not-found so existence is not leaked across identities. A quantity
/// at or below zero deletes the line instead of retaining it.
pub async fn update_item(
    db: &DatabaseConnection,
    identity: &CartIdentity,
    item_id: i64,
    quantity: i32,
) -> Result<CartMutation> {
    let shopping_cart = resolve_cart(db, identity).await?;
    let line = owned_line(db, shopping_cart.id, item_id).await?;

    let message = if quantity > 0 {
        let mut line: cart_item::ActiveModel = line.into();
        line.quantity = Set(quantity);
        line.update(db).await?;
        "Updated cart quantity".to_string()
    } else {
        line.delete(db).await?;
        "Removed item from cart".to_string()
    };

    touch_cart(db, shopping_cart.clone()).await?;
    let summary = cart_summary(db, shopping_cart.id).await?;
    Ok(CartMutation::new(message, summary))
}

/// Removes a line from the caller's cart unconditionally.
///
/// Safe to retry after success: a second attempt on the same id correctly
/// reports not-found rather than silently succeeding.
pub async fn remove_item(
    db: &DatabaseConnection,
    identity: &CartIdentity,
    item_id: i64,
) -> Result<CartMutation> {
    let shopping_cart = resolve_cart(db, identity).await?;
    let line = owned_line(db, shopping_cart.id, item_id).await?;
    line.delete(db).await?;

    touch_cart(db, shopping_cart.clone()).await?;
    let summary = cart_summary(db, shopping_cart.id).await?;
    Ok(CartMutation::new(
        "Removed item from cart".to_string(),
        summary,
    ))
}

/// Fetches a line by id, scoped to the owning cart.
async fn owned_line<C>(db: &C, cart_id: i64, item_id: i64) -> Result<cart_item::Model>
where
    C: ConnectionTrait,
{
    CartItem::find_by_id(item_id)
        .filter(cart_item::Column::CartId.eq(cart_id))
        .one(db)
        .await?
        .ok_or(Error::CartItemNotFound { id: item_id })
}

async fn touch_cart<C>(db: &C, shopping_cart: cart::Model) -> Result<()>
where
    C: ConnectionTrait,
{
    let mut shopping_cart: cart::ActiveModel = shopping_cart.into();
    shopping_cart.updated_at = Set(chrono::Utc::now());
    shopping_cart.update(db).await?;
    Ok(())
}

/// Retrieves all lines of a cart joined with their products.
pub async fn get_cart_items<C>(
    db: &C,
    cart_id: i64,
) -> Result<Vec<(cart_item::Model, product::Model)>>
where
    C: ConnectionTrait,
{
    let rows = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .find_also_related(Product)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(line, item)| {
            let item = item.ok_or_else(|| Error::ProductNotFound {
                name: line.product_id.to_string(),
            })?;
            Ok((line, item))
        })
        .collect()
}

/// Computes live cart totals by summing over current line items.
///
/// No denormalized total is maintained on the cart row; this is the single
/// way totals are derived, in decimal arithmetic throughout.
pub async fn cart_summary<C>(db: &C, cart_id: i64) -> Result<CartSummary>
where
    C: ConnectionTrait,
{
    let lines = get_cart_items(db, cart_id).await?;
    let total_items = lines.iter().map(|(line, _)| i64::from(line.quantity)).sum();
    let total_price = lines
        .iter()
        .map(|(line, item)| Decimal::from(line.quantity) * item.price)
        .sum();

    Ok(CartSummary {
        total_items,
        total_price,
    })
}

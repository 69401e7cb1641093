//! Unified error types for the storefront core.
//!
//! Every failure in this domain is scoped to a single request; nothing here
//! is fatal to the process. Not-found and validation conditions are surfaced
//! directly to the caller, never silently coerced.

use thiserror::Error;

/// All errors the storefront core can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// No category exists with the requested slug
    #[error("Category not found: {slug}")]
    CategoryNotFound {
        /// The slug that failed to resolve
        slug: String,
    },

    /// No available product matches the requested id or slug
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// The id or slug that failed to resolve
        name: String,
    },

    /// The cart line does not exist or belongs to a different cart
    #[error("Cart item not found: {id}")]
    CartItemNotFound {
        /// The cart-item id that failed to resolve
        id: i64,
    },

    /// No order exists with the requested id
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The order id that failed to resolve
        id: i64,
    },

    /// Cart creation lost the uniqueness race and the winner's row could not
    /// be fetched afterwards
    #[error("Conflicting cart creation for identity: {identity}")]
    CartConflict {
        /// Description of the cart identity involved
        identity: String,
    },

    /// A quantity was non-numeric or not a positive integer
    #[error("Invalid quantity: {raw}")]
    InvalidQuantity {
        /// The rejected input, as supplied
        raw: String,
    },

    /// A price or stock value was negative
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: String,
    },

    /// A required checkout field was missing or blank
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the field that was absent
        field: &'static str,
    },

    /// Checkout was attempted on a cart with no line items
    #[error("Cart is empty")]
    EmptyCart,

    /// An order status change violated the allowed transition chain
    #[error("Cannot move order from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Current status of the order
        from: crate::entities::order::OrderStatus,
        /// The rejected target status
        to: crate::entities::order::OrderStatus,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error, typically while reading configuration files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

//! Order administration logic - Status transitions and listings.
//!
//! Orders are immutable after checkout except for their fulfilment status
//! (and notes), which advance along the chain defined on
//! [`OrderStatus`](crate::entities::order::OrderStatus).

use crate::{
    entities::{Order, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::info;

/// Moves an order to a new fulfilment status.
///
/// Rejects transitions that are not the immediate next step in the chain,
/// cancellation excepted; terminal orders never change again.
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    next: order::OrderStatus,
) -> Result<order::Model> {
    let placed = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if !placed.status.can_transition_to(next) {
        return Err(Error::InvalidStatusTransition {
            from: placed.status,
            to: next,
        });
    }

    let from = placed.status;
    let mut placed: order::ActiveModel = placed.into();
    placed.status = Set(next);
    placed.updated_at = Set(chrono::Utc::now());
    let updated = placed.update(db).await?;

    info!(order_id, ?from, to = ?next, "order status changed");
    Ok(updated)
}

/// Retrieves the most recently placed orders, newest first.
pub async fn list_recent_orders(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::cart::{self, CartIdentity};
    use crate::core::checkout::place_order;
    use crate::entities::order::OrderStatus;
    use crate::test_utils::{
        create_test_category, create_test_product, sample_checkout_details, session_identity,
        setup_test_db,
    };

    #[test]
    fn test_status_transition_rules() {
        use OrderStatus::{Cancelled, Confirmed, Delivered, Pending, Preparing, Shipped};

        // Forward one step at a time
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));

        // No skipping or moving backwards
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Preparing));

        // Cancellation from any non-terminal state
        for status in [Pending, Confirmed, Preparing, Shipped] {
            assert!(status.can_transition_to(Cancelled));
        }

        // Terminal states are frozen
        for next in [Pending, Confirmed, Preparing, Shipped, Delivered, Cancelled] {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    async fn place_test_order(db: &sea_orm::DatabaseConnection) -> Result<order::Model> {
        let category = create_test_category(db, "Leafy greens").await?;
        let item = create_test_product(db, "Water spinach", category.id).await?;
        let identity = session_identity();
        cart::add_item(db, &identity, item.id, 1).await?;
        place_order(db, &identity, &sample_checkout_details()).await
    }

    #[tokio::test]
    async fn test_update_order_status_persists() -> Result<()> {
        let db = setup_test_db().await?;
        let placed = place_test_order(&db).await?;
        assert_eq!(placed.status, OrderStatus::Pending);

        let confirmed = update_order_status(&db, placed.id, OrderStatus::Confirmed).await?;
        assert_eq!(confirmed.status, OrderStatus::Confirmed);

        let retrieved = Order::find_by_id(placed.id).one(&db).await?.unwrap();
        assert_eq!(retrieved.status, OrderStatus::Confirmed);
        // The captured total never changes
        assert_eq!(retrieved.total_amount, placed.total_amount);

        Ok(())
    }

    #[tokio::test]
    async fn test_illegal_transition_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let placed = place_test_order(&db).await?;

        let result = update_order_status(&db, placed.id, OrderStatus::Delivered).await;
        assert!(matches!(
            result,
            Err(Error::InvalidStatusTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            })
        ));

        // Unchanged in storage
        let retrieved = Order::find_by_id(placed.id).one(&db).await?.unwrap();
        assert_eq!(retrieved.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_order_is_frozen() -> Result<()> {
        let db = setup_test_db().await?;
        let placed = place_test_order(&db).await?;

        update_order_status(&db, placed.id, OrderStatus::Cancelled).await?;
        let result = update_order_status(&db, placed.id, OrderStatus::Confirmed).await;
        assert!(matches!(result, Err(Error::InvalidStatusTransition { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_order_status(&db, 999, OrderStatus::Confirmed).await;
        assert!(matches!(result, Err(Error::OrderNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_recent_orders() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Roots").await?;
        let item = create_test_product(&db, "Carrot", category.id).await?;

        for key in ["first", "second"] {
            let identity = CartIdentity::Session(key.to_string());
            cart::add_item(&db, &identity, item.id, 1).await?;
            place_order(&db, &identity, &sample_checkout_details()).await?;
        }

        let recent = list_recent_orders(&db, 10).await?;
        assert_eq!(recent.len(), 2);

        let limited = list_recent_orders(&db, 1).await?;
        assert_eq!(limited.len(), 1);

        Ok(())
    }
}

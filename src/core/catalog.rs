//! Catalog business logic - Category and product queries and maintenance.
//!
//! Storefront reads (featured, latest, search, category browsing) only ever
//! see available products. The create/update helpers back the seed routine
//! and the administrative surface; they validate names, prices, and stock
//! levels before touching the database.

use crate::{
    entities::{Category, Product, category, product},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::sea_query::Condition;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// Optional filters for a product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Restrict to one category, addressed by slug
    pub category_slug: Option<String>,
    /// Substring match against product name or description
    pub search: Option<String>,
}

/// Retrieves all categories, ordered alphabetically by name.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its slug.
pub async fn get_category_by_slug(db: &DatabaseConnection, slug: &str) -> Result<category::Model> {
    Category::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            slug: slug.to_string(),
        })
}

/// Lists available products, newest first, applying the optional filters.
pub async fn list_available_products(
    db: &DatabaseConnection,
    query: &ProductQuery,
) -> Result<Vec<product::Model>> {
    let mut select = Product::find()
        .filter(product::Column::IsAvailable.eq(true))
        .order_by_desc(product::Column::CreatedAt);

    if let Some(slug) = &query.category_slug {
        let found = get_category_by_slug(db, slug).await?;
        select = select.filter(product::Column::CategoryId.eq(found.id));
    }

    if let Some(term) = query.search.as_deref().filter(|t| !t.trim().is_empty()) {
        let term = term.trim();
        select = select.filter(
            Condition::any()
                .add(product::Column::Name.contains(term))
                .add(product::Column::Description.contains(term)),
        );
    }

    select.all(db).await.map_err(Into::into)
}

/// Retrieves promoted products for the home page.
pub async fn featured_products(db: &DatabaseConnection, limit: u64) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsAvailable.eq(true))
        .filter(product::Column::IsFeatured.eq(true))
        .order_by_desc(product::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the most recently added available products.
pub async fn latest_products(db: &DatabaseConnection, limit: u64) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::IsAvailable.eq(true))
        .order_by_desc(product::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an available product by its slug.
pub async fn get_product_by_slug(db: &DatabaseConnection, slug: &str) -> Result<product::Model> {
    Product::find()
        .filter(product::Column::Slug.eq(slug))
        .filter(product::Column::IsAvailable.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: slug.to_string(),
        })
}

/// Retrieves a product by its unique ID, available or not.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves available products from the same category, excluding the
/// product itself.
pub async fn related_products(
    db: &DatabaseConnection,
    item: &product::Model,
    limit: u64,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::CategoryId.eq(item.category_id))
        .filter(product::Column::Id.ne(item.id))
        .filter(product::Column::IsAvailable.eq(true))
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category, validating the name and slug.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
    description: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    if slug.trim().is_empty() {
        return Err(Error::MissingField { field: "slug" });
    }

    let fresh = category::ActiveModel {
        name: Set(name.trim().to_string()),
        slug: Set(slug.trim().to_string()),
        description: Set(description),
        image: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    fresh.insert(db).await.map_err(Into::into)
}

/// Fields for a new catalog product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name
    pub name: String,
    /// URL-stable identifier
    pub slug: String,
    /// Owning category
    pub category_id: i64,
    /// Free-text description
    pub description: String,
    /// Price per unit, non-negative
    pub price: Decimal,
    /// Unit of sale
    pub unit: product::Unit,
    /// Advisory stock level, non-negative
    pub stock_quantity: i32,
    /// Whether to promote on the home page
    pub is_featured: bool,
    /// Optional region of origin
    pub origin: Option<String>,
}

/// Creates a new product, performing input validation.
///
/// New products start out available; visibility is adjusted afterwards via
/// [`update_product_listing`].
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model> {
    if new.name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    if new.slug.trim().is_empty() {
        return Err(Error::MissingField { field: "slug" });
    }
    if new.price < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: new.price.to_string(),
        });
    }
    if new.stock_quantity < 0 {
        return Err(Error::InvalidAmount {
            amount: new.stock_quantity.to_string(),
        });
    }

    let now = chrono::Utc::now();
    let fresh = product::ActiveModel {
        name: Set(new.name.trim().to_string()),
        slug: Set(new.slug.trim().to_string()),
        category_id: Set(new.category_id),
        description: Set(new.description),
        price: Set(new.price),
        unit: Set(new.unit),
        image: Set(None),
        stock_quantity: Set(new.stock_quantity),
        is_available: Set(true),
        is_featured: Set(new.is_featured),
        origin: Set(new.origin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    fresh.insert(db).await.map_err(Into::into)
}

/// Direct field edits on a product listing, as exposed to administrators.
///
/// Only the supplied fields change.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingUpdate {
    /// New price per unit, non-negative
    pub price: Option<Decimal>,
    /// New advisory stock level, non-negative
    pub stock_quantity: Option<i32>,
    /// New visibility flag
    pub is_available: Option<bool>,
    /// New promotion flag
    pub is_featured: Option<bool>,
}

/// Applies an administrative listing update to a product.
pub async fn update_product_listing(
    db: &DatabaseConnection,
    product_id: i64,
    update: ListingUpdate,
) -> Result<product::Model> {
    if let Some(price) = update.price {
        if price < Decimal::ZERO {
            return Err(Error::InvalidAmount {
                amount: price.to_string(),
            });
        }
    }
    if let Some(stock) = update.stock_quantity {
        if stock < 0 {
            return Err(Error::InvalidAmount {
                amount: stock.to_string(),
            });
        }
    }

    let mut item: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    if let Some(price) = update.price {
        item.price = Set(price);
    }
    if let Some(stock) = update.stock_quantity {
        item.stock_quantity = Set(stock);
    }
    if let Some(available) = update.is_available {
        item.is_available = Set(available);
    }
    if let Some(featured) = update.is_featured {
        item.is_featured = Set(featured);
    }
    item.updated_at = Set(chrono::Utc::now());

    item.update(db).await.map_err(Into::into)
}

/// Deletes a product from the catalog.
///
/// Cart lines referencing it are removed with it; order lines keep their
/// snapshots and merely lose the live reference.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let item = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;
    item.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{
        create_custom_product, create_test_category, create_test_product, setup_test_db,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let base = NewProduct {
            name: "Carrot".to_string(),
            slug: "carrot".to_string(),
            category_id: 1,
            description: "Sweet carrots".to_string(),
            price: Decimal::from(18000),
            unit: product::Unit::Kilogram,
            stock_quantity: 10,
            is_featured: false,
            origin: None,
        };

        let mut unnamed = base.clone();
        unnamed.name = "   ".to_string();
        let result = create_product(&db, unnamed).await;
        assert!(matches!(result, Err(Error::MissingField { field: "name" })));

        let mut negative = base.clone();
        negative.price = Decimal::from(-1);
        let result = create_product(&db, negative).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let mut understocked = base;
        understocked.stock_quantity = -5;
        let result = create_product(&db, understocked).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_category_lookup_by_slug() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_category(&db, "Leafy greens").await?;

        let found = get_category_by_slug(&db, &created.slug).await?;
        assert_eq!(found.id, created.id);

        let missing = get_category_by_slug(&db, "no-such-category").await;
        assert!(matches!(missing, Err(Error::CategoryNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_respects_availability_and_category() -> Result<()> {
        let db = setup_test_db().await?;
        let greens = create_test_category(&db, "Leafy greens").await?;
        let roots = create_test_category(&db, "Roots").await?;

        let spinach =
            create_custom_product(&db, "Water spinach", Decimal::from(25000), greens.id, true)
                .await?;
        create_custom_product(&db, "Hidden kale", Decimal::from(20000), greens.id, false).await?;
        let carrot =
            create_custom_product(&db, "Carrot", Decimal::from(18000), roots.id, true).await?;

        let all = list_available_products(&db, &ProductQuery::default()).await?;
        assert_eq!(all.len(), 2);

        let query = ProductQuery {
            category_slug: Some(greens.slug.clone()),
            search: None,
        };
        let greens_only = list_available_products(&db, &query).await?;
        assert_eq!(greens_only.len(), 1);
        assert_eq!(greens_only[0].id, spinach.id);

        let query = ProductQuery {
            category_slug: None,
            search: Some("carrot".to_string()),
        };
        let searched = list_available_products(&db, &query).await?;
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].id, carrot.id);

        let query = ProductQuery {
            category_slug: Some("no-such-category".to_string()),
            search: None,
        };
        let missing = list_available_products(&db, &query).await;
        assert!(matches!(missing, Err(Error::CategoryNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_search_matches_description() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Herbs").await?;
        create_product(
            &db,
            NewProduct {
                name: "Coriander".to_string(),
                slug: "coriander".to_string(),
                category_id: category.id,
                description: "Fragrant herb for pho".to_string(),
                price: Decimal::from(8000),
                unit: product::Unit::Bundle,
                stock_quantity: 30,
                is_featured: false,
                origin: None,
            },
        )
        .await?;

        let query = ProductQuery {
            category_slug: None,
            search: Some("pho".to_string()),
        };
        let found = list_available_products(&db, &query).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Coriander");

        Ok(())
    }

    #[tokio::test]
    async fn test_featured_products_filter() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Fruit").await?;

        create_product(
            &db,
            NewProduct {
                name: "King orange".to_string(),
                slug: "king-orange".to_string(),
                category_id: category.id,
                description: "Sweet oranges".to_string(),
                price: Decimal::from(45000),
                unit: product::Unit::Kilogram,
                stock_quantity: 20,
                is_featured: true,
                origin: None,
            },
        )
        .await?;
        create_test_product(&db, "Banana", category.id).await?;

        let featured = featured_products(&db, 6).await?;
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "King orange");

        let latest = latest_products(&db, 8).await?;
        assert_eq!(latest.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_by_slug_requires_availability() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Mushrooms").await?;
        let hidden =
            create_custom_product(&db, "Hidden", Decimal::from(10000), category.id, false).await?;

        let result = get_product_by_slug(&db, &hidden.slug).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));

        // Direct id lookup still sees it (administrative path)
        let found = get_product_by_id(&db, hidden.id).await?;
        assert!(found.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_related_products_excludes_self() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Roots").await?;
        let carrot = create_test_product(&db, "Carrot", category.id).await?;
        let potato = create_test_product(&db, "Potato", category.id).await?;

        let related = related_products(&db, &carrot, 4).await?;
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, potato.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_listing() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Roots").await?;
        let carrot = create_test_product(&db, "Carrot", category.id).await?;

        let updated = update_product_listing(
            &db,
            carrot.id,
            ListingUpdate {
                price: Some(Decimal::from(21000)),
                stock_quantity: Some(5),
                is_available: Some(false),
                is_featured: Some(true),
            },
        )
        .await?;

        assert_eq!(updated.price, Decimal::from(21000));
        assert_eq!(updated.stock_quantity, 5);
        assert!(!updated.is_available);
        assert!(updated.is_featured);
        // Untouched fields survive
        assert_eq!(updated.name, "Carrot");

        let result = update_product_listing(
            &db,
            carrot.id,
            ListingUpdate {
                price: Some(Decimal::from(-1)),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = update_product_listing(&db, 999, ListingUpdate::default()).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Roots").await?;
        let carrot = create_test_product(&db, "Carrot", category.id).await?;

        delete_product(&db, carrot.id).await?;
        assert!(get_product_by_id(&db, carrot.id).await?.is_none());

        let result = delete_product(&db, carrot.id).await;
        assert!(matches!(result, Err(Error::ProductNotFound { .. })));

        Ok(())
    }
}

//! # Product Integrity Service
//!
//! Natural key: name (case-insensitive). Referential rule: the category
//! must exist at create time. Updates never repoint the category.

use tracing::debug;

use storefront_core::validation::validate_product;
use storefront_core::{NewProduct, Price, Product, ProductDraft, ValidationFailure};
use storefront_db::Database;

use crate::error::{ServiceError, ServiceResult};

const DUPLICATE_NAME: &str = "a product with the same name already exists";

/// Lists all products.
pub async fn list(db: &Database) -> ServiceResult<Vec<Product>> {
    Ok(db.products().list().await?)
}

/// Gets one product, or NotFound.
pub async fn get(db: &Database, id: i64) -> ServiceResult<Product> {
    db.products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("product", id))
}

/// Creates a product. The referenced category must exist; orphaned
/// category ids are refused rather than silently accepted.
pub async fn create(db: &Database, draft: ProductDraft) -> ServiceResult<Product> {
    debug!(name = %draft.name, category_id = draft.category_id, "create product");

    let violations = validate_product(&draft);
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    if db.products().find_by_name(&draft.name, None).await?.is_some() {
        return Err(ServiceError::conflict(DUPLICATE_NAME));
    }

    if !db.categories().exists(draft.category_id).await? {
        return Err(ServiceError::conflict(
            "the referenced category does not exist",
        ));
    }

    let price = parse_price(&draft.price)?;
    let created = db
        .products()
        .insert(&NewProduct {
            category_id: draft.category_id,
            name: draft.name,
            description: draft.description,
            price,
            stock: draft.stock,
        })
        .await?;
    Ok(created)
}

/// Full-record update of the descriptive and numeric fields. The
/// category reference stays whatever it was.
pub async fn update(db: &Database, id: i64, draft: ProductDraft) -> ServiceResult<Product> {
    if draft.id != id {
        return Err(ServiceError::validation(
            "product id does not match the path id",
        ));
    }

    let existing = get(db, id).await?;
    debug!(id = existing.id, "update product");

    let violations = validate_product(&draft);
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    if db
        .products()
        .find_by_name(&draft.name, Some(id))
        .await?
        .is_some()
    {
        return Err(ServiceError::conflict(DUPLICATE_NAME));
    }

    let price = parse_price(&draft.price)?;
    let updated = Product {
        id,
        category_id: existing.category_id,
        name: draft.name,
        description: draft.description,
        price,
        stock: draft.stock,
    };
    db.products().update(&updated).await?;
    Ok(updated)
}

/// Deletes a product. No dependency check: sales keep their soft
/// reference and render a null snapshot afterwards.
pub async fn delete(db: &Database, id: i64) -> ServiceResult<()> {
    let existing = get(db, id).await?;
    debug!(id = existing.id, "delete product");
    db.products().delete(id).await?;
    Ok(())
}

/// Re-parses price text the validation rules have already accepted.
fn parse_price(raw: &str) -> ServiceResult<Price> {
    Price::parse(raw).map_err(|e| ServiceError::validation(format!("price {e}")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{category, testing::db};
    use storefront_core::CategoryDraft;
    use storefront_db::Database;

    async fn db_with_category() -> (Database, i64) {
        let db = db().await;
        let cat = category::create(
            &db,
            CategoryDraft {
                id: 0,
                name: "Furniture".into(),
                description: "Home goods".into(),
            },
        )
        .await
        .unwrap();
        (db, cat.id)
    }

    fn chair(category_id: i64) -> ProductDraft {
        ProductDraft {
            id: 0,
            category_id,
            name: "Chair".into(),
            description: Some("Wooden chair".into()),
            price: "49.99".into(),
            stock: 10,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (db, category_id) = db_with_category().await;
        let created = create(&db, chair(category_id)).await.unwrap();
        let fetched = get(&db, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.price.cents(), 4999);
    }

    #[tokio::test]
    async fn create_refuses_orphan_category() {
        let (db, _) = db_with_category().await;
        let err = create(&db, chair(999)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_rejects_zero_stock() {
        let (db, category_id) = db_with_category().await;
        let err = create(
            &db,
            ProductDraft {
                stock: 0,
                ..chair(category_id)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_regardless_of_case() {
        let (db, category_id) = db_with_category().await;
        create(&db, chair(category_id)).await.unwrap();
        let err = create(
            &db,
            ProductDraft {
                name: "CHAIR".into(),
                price: "10".into(),
                ..chair(category_id)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_does_not_repoint_the_category() {
        let (db, category_id) = db_with_category().await;
        let created = create(&db, chair(category_id)).await.unwrap();

        let updated = update(
            &db,
            created.id,
            ProductDraft {
                id: created.id,
                category_id: 999, // ignored on update
                name: "Armchair".into(),
                description: None,
                price: "89.50".into(),
                stock: 3,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.category_id, category_id);
        assert_eq!(updated.name, "Armchair");
        assert_eq!(updated.price.cents(), 8950);
        assert_eq!(updated.stock, 3);
    }

    #[tokio::test]
    async fn update_requires_matching_id() {
        let (db, category_id) = db_with_category().await;
        let created = create(&db, chair(category_id)).await.unwrap();
        let err = update(
            &db,
            created.id,
            ProductDraft {
                id: 0,
                ..chair(category_id)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}

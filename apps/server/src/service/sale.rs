//! # Sale Integrity Service
//!
//! No natural key. Referential rule: the product must exist at create
//! time. The delete rule is deliberately inverted relative to the
//! category rule: a sale can only be removed once its product is gone.

use chrono::Utc;
use tracing::debug;

use storefront_core::validation::validate_sale;
use storefront_core::{NewSale, Price, Sale, SaleDraft, SaleWithProduct, ValidationFailure};
use storefront_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// Lists all sales with their product snapshots.
pub async fn list(db: &Database) -> ServiceResult<Vec<SaleWithProduct>> {
    Ok(db.sales().list_with_products().await?)
}

/// Gets one sale (flat), or NotFound.
pub async fn get(db: &Database, id: i64) -> ServiceResult<Sale> {
    db.sales()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("sale", id))
}

/// Records a sale. The date rule runs against the current instant; a
/// sale is only ever recorded for now or the future.
pub async fn create(db: &Database, draft: SaleDraft) -> ServiceResult<Sale> {
    debug!(product_id = draft.product_id, "create sale");

    let violations = validate_sale(&draft, Utc::now());
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    if !db.products().exists(draft.product_id).await? {
        return Err(ServiceError::conflict(
            "the referenced product does not exist",
        ));
    }

    let (sale_date, total) = validated_fields(&draft)?;
    let created = db
        .sales()
        .insert(&NewSale {
            product_id: draft.product_id,
            quantity: draft.quantity,
            sale_date,
            total,
        })
        .await?;
    Ok(created)
}

/// Full-record update of quantity, date, and total. The product
/// reference stays whatever it was.
pub async fn update(db: &Database, id: i64, draft: SaleDraft) -> ServiceResult<Sale> {
    if draft.id != id {
        return Err(ServiceError::validation(
            "sale id does not match the path id",
        ));
    }

    let existing = get(db, id).await?;
    debug!(id = existing.id, "update sale");

    let violations = validate_sale(&draft, Utc::now());
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    let (sale_date, total) = validated_fields(&draft)?;
    let updated = Sale {
        id,
        product_id: existing.product_id,
        quantity: draft.quantity,
        sale_date,
        total,
    };
    db.sales().update(&updated).await?;
    Ok(updated)
}

/// Deletes a sale, but only once the referenced product has been
/// removed. Inverted on purpose; see the module docs.
pub async fn delete(db: &Database, id: i64) -> ServiceResult<()> {
    let existing = get(db, id).await?;
    debug!(id = existing.id, "delete sale");

    if db.products().exists(existing.product_id).await? {
        return Err(ServiceError::conflict(
            "cannot delete the sale because its product still exists",
        ));
    }

    db.sales().delete(id).await?;
    Ok(())
}

/// Re-parses fields the validation rules have already accepted.
fn validated_fields(draft: &SaleDraft) -> ServiceResult<(chrono::DateTime<Utc>, Price)> {
    let sale_date = draft
        .sale_date
        .ok_or_else(|| ServiceError::validation("saleDate is required"))?;
    let total =
        Price::parse(&draft.total).map_err(|e| ServiceError::validation(format!("total {e}")))?;
    Ok((sale_date, total))
}

// =============================================================================
// Unit Tests
// =============================================================================

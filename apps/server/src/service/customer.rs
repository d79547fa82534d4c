//! # Customer Integrity Service
//!
//! Natural key: email (case-insensitive). No dependents in this model,
//! so deletes carry no dependency check.

use tracing::debug;

use storefront_core::validation::validate_customer;
use storefront_core::{Customer, CustomerDraft, NewCustomer, ValidationFailure};
use storefront_db::Database;

use crate::error::{ServiceError, ServiceResult};

const DUPLICATE_EMAIL: &str = "a customer with the same email already exists";

/// Lists all customers.
pub async fn list(db: &Database) -> ServiceResult<Vec<Customer>> {
    Ok(db.customers().list().await?)
}

/// Gets one customer, or NotFound.
pub async fn get(db: &Database, id: i64) -> ServiceResult<Customer> {
    db.customers()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("customer", id))
}

/// Creates a customer.
pub async fn create(db: &Database, draft: CustomerDraft) -> ServiceResult<Customer> {
    debug!(email = %draft.email, "create customer");

    let violations = validate_customer(&draft);
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    if db
        .customers()
        .find_by_email(&draft.email, None)
        .await?
        .is_some()
    {
        return Err(ServiceError::conflict(DUPLICATE_EMAIL));
    }

    let created = db
        .customers()
        .insert(&NewCustomer {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
        })
        .await?;
    Ok(created)
}

/// Full-record update of all descriptive fields.
pub async fn update(db: &Database, id: i64, draft: CustomerDraft) -> ServiceResult<Customer> {
    if draft.id != id {
        return Err(ServiceError::validation(
            "customer id does not match the path id",
        ));
    }

    let existing = get(db, id).await?;
    debug!(id = existing.id, "update customer");

    let violations = validate_customer(&draft);
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    if db
        .customers()
        .find_by_email(&draft.email, Some(id))
        .await?
        .is_some()
    {
        return Err(ServiceError::conflict(DUPLICATE_EMAIL));
    }

    let updated = Customer {
        id,
        first_name: draft.first_name,
        last_name: draft.last_name,
        email: draft.email,
        phone: draft.phone,
    };
    db.customers().update(&updated).await?;
    Ok(updated)
}

/// Deletes a customer. No dependency check.
pub async fn delete(db: &Database, id: i64) -> ServiceResult<()> {
    let existing = get(db, id).await?;
    debug!(id = existing.id, "delete customer");
    db.customers().delete(id).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::db;

    fn ana() -> CustomerDraft {
        CustomerDraft {
            id: 0,
            first_name: "Ana".into(),
            last_name: "Lopez".into(),
            email: "ana@example.com".into(),
            phone: "1234567890".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let db = db().await;
        let created = create(&db, ana()).await.unwrap();
        let fetched = get(&db, created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_short_phone() {
        let db = db().await;
        let err = create(
            &db,
            CustomerDraft {
                phone: "12345".into(),
                ..ana()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_regardless_of_case() {
        let db = db().await;
        create(&db, ana()).await.unwrap();
        let err = create(
            &db,
            CustomerDraft {
                first_name: "Bea".into(),
                email: "ANA@EXAMPLE.COM".into(),
                ..ana()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_overwrites_all_descriptive_fields() {
        let db = db().await;
        let created = create(&db, ana()).await.unwrap();

        let updated = update(
            &db,
            created.id,
            CustomerDraft {
                id: created.id,
                first_name: "Anna".into(),
                last_name: "Lopez Diaz".into(),
                email: "anna@example.com".into(),
                phone: "0987654321".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.first_name, "Anna");
        assert_eq!(updated.email, "anna@example.com");
        assert_eq!(get(&db, created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_requires_matching_id() {
        let db = db().await;
        let created = create(&db, ana()).await.unwrap();
        let err = update(&db, created.id, CustomerDraft { id: 0, ..ana() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_has_no_dependency_check() {
        let db = db().await;
        let created = create(&db, ana()).await.unwrap();
        delete(&db, created.id).await.unwrap();
        assert!(matches!(
            get(&db, created.id).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
    }
}

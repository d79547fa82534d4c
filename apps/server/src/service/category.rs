//! # Category Integrity Service
//!
//! Natural key: name (case-insensitive). Dependency rule: a category
//! with dependent products cannot be deleted.

use tracing::debug;

use storefront_core::validation::validate_category;
use storefront_core::{Category, CategoryDraft, NewCategory, ValidationFailure};
use storefront_db::Database;

use crate::error::{ServiceError, ServiceResult};

const DUPLICATE_NAME: &str = "a category with the same name already exists";

/// Lists all categories.
pub async fn list(db: &Database) -> ServiceResult<Vec<Category>> {
    Ok(db.categories().list().await?)
}

/// Gets one category, or NotFound.
pub async fn get(db: &Database, id: i64) -> ServiceResult<Category> {
    db.categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("category", id))
}

/// Creates a category. The draft id is ignored; the store assigns one.
pub async fn create(db: &Database, draft: CategoryDraft) -> ServiceResult<Category> {
    debug!(name = %draft.name, "create category");

    let violations = validate_category(&draft);
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    if db.categories().find_by_name(&draft.name, None).await?.is_some() {
        return Err(ServiceError::conflict(DUPLICATE_NAME));
    }

    let created = db
        .categories()
        .insert(&NewCategory {
            name: draft.name,
            description: draft.description,
        })
        .await?;
    Ok(created)
}

/// Full-record update. The body id must match the path id.
pub async fn update(db: &Database, id: i64, draft: CategoryDraft) -> ServiceResult<Category> {
    if draft.id != id {
        return Err(ServiceError::validation(
            "category id does not match the path id",
        ));
    }

    let existing = get(db, id).await?;
    debug!(id = existing.id, "update category");

    let violations = validate_category(&draft);
    if !violations.is_empty() {
        return Err(ServiceError::validation(ValidationFailure(violations)));
    }

    // Excluding our own id keeps an unchanged name from reading as a
    // conflict.
    if db
        .categories()
        .find_by_name(&draft.name, Some(id))
        .await?
        .is_some()
    {
        return Err(ServiceError::conflict(DUPLICATE_NAME));
    }

    let updated = Category {
        id,
        name: draft.name,
        description: draft.description,
    };
    db.categories().update(&updated).await?;
    Ok(updated)
}

/// Deletes a category, refusing while any product references it.
pub async fn delete(db: &Database, id: i64) -> ServiceResult<()> {
    let existing = get(db, id).await?;
    debug!(id = existing.id, "delete category");

    if db.products().any_in_category(id).await? {
        return Err(ServiceError::conflict(
            "cannot delete the category because it has dependent products",
        ));
    }

    db.categories().delete(id).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::db;

    fn furniture() -> CategoryDraft {
        CategoryDraft {
            id: 0,
            name: "Furniture".into(),
            description: "Home goods".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let db = db().await;
        let created = create(&db, furniture()).await.unwrap();
        let fetched = get(&db, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Furniture");
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_before_store_access() {
        let db = db().await;
        let err = create(
            &db,
            CategoryDraft {
                name: "123".into(),
                ..furniture()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_regardless_of_case() {
        let db = db().await;
        create(&db, furniture()).await.unwrap();
        let err = create(
            &db,
            CategoryDraft {
                name: "fUrNiTuRe".into(),
                description: "Different description".into(),
                id: 0,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_requires_matching_id() {
        let db = db().await;
        let created = create(&db, furniture()).await.unwrap();
        let err = update(
            &db,
            created.id,
            CategoryDraft {
                id: created.id + 1,
                ..furniture()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_keeps_own_name_without_conflict() {
        let db = db().await;
        let created = create(&db, furniture()).await.unwrap();

        let updated = update(
            &db,
            created.id,
            CategoryDraft {
                id: created.id,
                name: "Furniture".into(),
                description: "Still home goods".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.description, "Still home goods");
    }

    #[tokio::test]
    async fn missing_ids_report_not_found() {
        let db = db().await;
        assert!(matches!(
            get(&db, 42).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
        assert!(matches!(
            delete(&db, 42).await.unwrap_err(),
            ServiceError::NotFound { .. }
        ));
        assert!(matches!(
            update(&db, 42, CategoryDraft { id: 42, ..furniture() })
                .await
                .unwrap_err(),
            ServiceError::NotFound { .. }
        ));
    }
}

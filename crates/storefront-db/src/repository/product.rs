//! # Product Repository
//!
//! Database operations for products. Prices cross this boundary as
//! integer cents; the [`Price`] mapping happens in the row conversion.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{NewProduct, Price, Product};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    category_id: i64,
    name: String,
    description: Option<String>,
    price_cents: i64,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            price: Price::from_cents(row.price_cents),
            stock: row.stock,
        }
    }
}

const COLUMNS: &str = "id, category_id, name, description, price_cents, stock";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products in id order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Product::from))
    }

    /// Finds a product by name (case-insensitive), optionally excluding
    /// one id.
    pub async fn find_by_name(&self, name: &str, exclude_id: Option<i64>) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE name = ?1 AND (?2 IS NULL OR id <> ?2)"
        ))
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Product::from))
    }

    /// True when a product with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }

    /// True when any product references the given category. Drives the
    /// category delete dependency check.
    pub async fn any_in_category(&self, category_id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE category_id = ?1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(found != 0)
    }

    /// Inserts a new product and returns it with the assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (category_id, name, description, price_cents, stock) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            category_id: product.category_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
        })
    }

    /// Overwrites an existing product. The category reference is written
    /// as-is; callers decide whether it may change.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            "UPDATE products SET category_id = ?2, name = ?3, description = ?4, \
             price_cents = ?5, stock = ?6 WHERE id = ?1",
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", product.id));
        }
        Ok(())
    }

    /// Deletes a product by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use storefront_core::NewCategory;

    async fn db_with_category() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .insert(&NewCategory {
                name: "Furniture".into(),
                description: "Home goods".into(),
            })
            .await
            .unwrap();
        (db, category.id)
    }

    fn chair(category_id: i64) -> NewProduct {
        NewProduct {
            category_id,
            name: "Chair".into(),
            description: None,
            price: Price::from_cents(4999),
            stock: 10,
        }
    }

    #[tokio::test]
    async fn insert_round_trips_price_cents() {
        let (db, category_id) = db_with_category().await;
        let repo = db.products();

        let created = repo.insert(&chair(category_id)).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.price.cents(), 4999);
    }

    #[tokio::test]
    async fn category_dependency_probe() {
        let (db, category_id) = db_with_category().await;
        let repo = db.products();

        assert!(!repo.any_in_category(category_id).await.unwrap());
        let product = repo.insert(&chair(category_id)).await.unwrap();
        assert!(repo.any_in_category(category_id).await.unwrap());

        repo.delete(product.id).await.unwrap();
        assert!(!repo.any_in_category(category_id).await.unwrap());
    }

    #[tokio::test]
    async fn fk_backstop_rejects_orphan_category() {
        let (db, _) = db_with_category().await;
        let err = db.products().insert(&chair(999)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn name_backstop_is_case_insensitive() {
        let (db, category_id) = db_with_category().await;
        let repo = db.products();
        repo.insert(&chair(category_id)).await.unwrap();

        let err = repo
            .insert(&NewProduct {
                name: "CHAIR".into(),
                ..chair(category_id)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}

//! # Sale Repository
//!
//! Database operations for sales.
//!
//! Sale reads eagerly join the product snapshot. The join is LEFT
//! because `product_id` is a soft reference: the product may have been
//! deleted after the sale was recorded, in which case the snapshot
//! columns come back NULL.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{NewSale, Price, Product, Sale, SaleWithProduct};

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    product_id: i64,
    quantity: i64,
    sale_date: DateTime<Utc>,
    total_cents: i64,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            sale_date: row.sale_date,
            total: Price::from_cents(row.total_cents),
        }
    }
}

/// Sale row joined against its (possibly deleted) product.
#[derive(Debug, sqlx::FromRow)]
struct SaleJoinRow {
    id: i64,
    product_id: i64,
    quantity: i64,
    sale_date: DateTime<Utc>,
    total_cents: i64,
    p_id: Option<i64>,
    p_category_id: Option<i64>,
    p_name: Option<String>,
    p_description: Option<String>,
    p_price_cents: Option<i64>,
    p_stock: Option<i64>,
}

impl From<SaleJoinRow> for SaleWithProduct {
    fn from(row: SaleJoinRow) -> Self {
        let product = match (
            row.p_id,
            row.p_category_id,
            row.p_name,
            row.p_price_cents,
            row.p_stock,
        ) {
            (Some(id), Some(category_id), Some(name), Some(price_cents), Some(stock)) => {
                Some(Product {
                    id,
                    category_id,
                    name,
                    description: row.p_description,
                    price: Price::from_cents(price_cents),
                    stock,
                })
            }
            _ => None,
        };
        SaleWithProduct {
            sale: Sale {
                id: row.id,
                product_id: row.product_id,
                quantity: row.quantity,
                sale_date: row.sale_date,
                total: Price::from_cents(row.total_cents),
            },
            product,
        }
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists all sales with their product snapshots, in id order.
    pub async fn list_with_products(&self) -> DbResult<Vec<SaleWithProduct>> {
        let rows = sqlx::query_as::<_, SaleJoinRow>(
            "SELECT s.id, s.product_id, s.quantity, s.sale_date, s.total_cents, \
                    p.id AS p_id, p.category_id AS p_category_id, p.name AS p_name, \
                    p.description AS p_description, p.price_cents AS p_price_cents, \
                    p.stock AS p_stock \
             FROM sales s \
             LEFT JOIN products p ON p.id = s.product_id \
             ORDER BY s.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SaleWithProduct::from).collect())
    }

    /// Gets a sale by id (flat, no product snapshot).
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            "SELECT id, product_id, quantity, sale_date, total_cents FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Sale::from))
    }

    /// Inserts a new sale and returns it with the assigned id.
    pub async fn insert(&self, sale: &NewSale) -> DbResult<Sale> {
        debug!(product_id = sale.product_id, "Inserting sale");

        let result = sqlx::query(
            "INSERT INTO sales (product_id, quantity, sale_date, total_cents) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(sale.product_id)
        .bind(sale.quantity)
        .bind(sale.sale_date)
        .bind(sale.total.cents())
        .execute(&self.pool)
        .await?;

        Ok(Sale {
            id: result.last_insert_rowid(),
            product_id: sale.product_id,
            quantity: sale.quantity,
            sale_date: sale.sale_date,
            total: sale.total,
        })
    }

    /// Overwrites an existing sale. The product reference is written
    /// as-is; callers decide whether it may change.
    pub async fn update(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = sale.id, "Updating sale");

        let result = sqlx::query(
            "UPDATE sales SET product_id = ?2, quantity = ?3, sale_date = ?4, \
             total_cents = ?5 WHERE id = ?1",
        )
        .bind(sale.id)
        .bind(sale.product_id)
        .bind(sale.quantity)
        .bind(sale.sale_date)
        .bind(sale.total.cents())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("sale", sale.id));
        }
        Ok(())
    }

    /// Deletes a sale by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("sale", id));
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
    use storefront_core::{NewCategory, NewProduct};

    async fn db_with_product() -> (Database, Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .insert(&NewCategory {
                name: "Furniture".into(),
                description: "Home goods".into(),
            })
            .await
            .unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                category_id: category.id,
                name: "Chair".into(),
                description: None,
                price: Price::from_cents(4999),
                stock: 10,
            })
            .await
            .unwrap();
        (db, product)
    }

    fn sale_of(product_id: i64) -> NewSale {
        NewSale {
            product_id,
            quantity: 2,
            sale_date: "2999-01-01T00:00:00Z".parse().unwrap(),
            total: Price::from_cents(9998),
        }
    }

    #[tokio::test]
    async fn insert_round_trips_sale_date() {
        let (db, product) = db_with_product().await;
        let repo = db.sales();

        let created = repo.insert(&sale_of(product.id)).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(
            fetched.sale_date,
            "2999-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[tokio::test]
    async fn list_joins_product_snapshot() {
        let (db, product) = db_with_product().await;
        db.sales().insert(&sale_of(product.id)).await.unwrap();

        let sales = db.sales().list_with_products().await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product.as_ref().map(|p| p.id), Some(product.id));
    }

    #[tokio::test]
    async fn snapshot_is_none_after_product_deletion() {
        let (db, product) = db_with_product().await;
        db.sales().insert(&sale_of(product.id)).await.unwrap();
        db.products().delete(product.id).await.unwrap();

        let sales = db.sales().list_with_products().await.unwrap();
        assert_eq!(sales.len(), 1);
        assert!(sales[0].product.is_none());
        assert_eq!(sales[0].sale.product_id, product.id);
    }
}

//! # Customer Repository
//!
//! Database operations for customers. Natural key: `email`,
//! case-insensitive via `COLLATE NOCASE`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{Customer, NewCustomer};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
        }
    }
}

const COLUMNS: &str = "id, first_name, last_name, email, phone";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers in id order.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Customer::from))
    }

    /// Finds a customer by email (case-insensitive), optionally
    /// excluding one id.
    pub async fn find_by_email(&self, email: &str, exclude_id: Option<i64>) -> DbResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE email = ?1 AND (?2 IS NULL OR id <> ?2)"
        ))
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Customer::from))
    }

    /// Inserts a new customer and returns it with the assigned id.
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        debug!(email = %customer.email, "Inserting customer");

        let result = sqlx::query(
            "INSERT INTO customers (first_name, last_name, email, phone) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        })
    }

    /// Overwrites an existing customer.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = customer.id, "Updating customer");

        let result = sqlx::query(
            "UPDATE customers SET first_name = ?2, last_name = ?3, email = ?4, phone = ?5 \
             WHERE id = ?1",
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("customer", customer.id));
        }
        Ok(())
    }

    /// Deletes a customer by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("customer", id));
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

    fn ana() -> NewCustomer {
        NewCustomer {
            first_name: "Ana".into(),
            last_name: "Lopez".into(),
            email: "ana@example.com".into(),
            phone: "1234567890".into(),
        }
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();
        let created = repo.insert(&ana()).await.unwrap();

        let found = repo.find_by_email("ANA@EXAMPLE.COM", None).await.unwrap();
        assert_eq!(found, Some(created.clone()));
        let found = repo
            .find_by_email("ana@example.com", Some(created.id))
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn email_backstop_rejects_duplicates() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();
        repo.insert(&ana()).await.unwrap();

        let err = repo
            .insert(&NewCustomer {
                email: "Ana@Example.com".into(),
                ..ana()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}

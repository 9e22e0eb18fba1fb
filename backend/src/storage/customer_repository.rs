use anyhow::Result;
use sqlx::Row;

use crate::storage::db::DbConnection;
use shared::{CreateCustomerRequest, Customer};

/// Repository for customer records
#[derive(Clone)]
pub struct CustomerRepository {
    db: DbConnection,
}

impl CustomerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a customer and return the store-assigned id
    pub async fn store_customer(&self, customer: &CreateCustomerRequest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (first_name, last_name, national_id, phone, email, address)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.national_id)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a customer by id
    pub async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, national_id, phone, email, address
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(customer_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| Self::map_row(&r)))
    }

    /// List all customers ordered by id
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, national_id, phone, email, address
            FROM customers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    /// Update a customer in place; returns true if a row matched
    pub async fn update_customer(&self, customer: &Customer) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, national_id = ?, phone = ?, email = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.national_id)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a customer; returns true if a row existed.
    ///
    /// Does not cascade: reservations keep their customer_id as a weak
    /// reference (matching the original system's behavior).
    pub async fn delete_customer(&self, customer_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(customer_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn map_row(row: &sqlx::sqlite::SqliteRow) -> Customer {
        Customer {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            national_id: row.get("national_id"),
            phone: row.get("phone"),
            email: row.get("email"),
            address: row.get("address"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer(national_id: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            national_id: national_id.to_string(),
            phone: "0991234567".to_string(),
            email: "maria@example.com".to_string(),
            address: "Av. Amazonas 123".to_string(),
        }
    }

    async fn setup_test() -> CustomerRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        CustomerRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_get_customer() {
        let repo = setup_test().await;

        let id = repo
            .store_customer(&sample_customer("1712345678"))
            .await
            .expect("Failed to store customer");
        assert!(id > 0);

        let customer = repo
            .get_customer(id)
            .await
            .expect("Failed to get customer")
            .expect("Customer should exist");
        assert_eq!(customer.first_name, "Maria");
        assert_eq!(customer.national_id, "1712345678");
    }

    #[tokio::test]
    async fn test_duplicate_national_id_rejected_by_schema() {
        let repo = setup_test().await;

        repo.store_customer(&sample_customer("1712345678"))
            .await
            .expect("Failed to store customer");

        let result = repo.store_customer(&sample_customer("1712345678")).await;
        assert!(result.is_err(), "UNIQUE constraint should reject the duplicate");

        let customers = repo.list_customers().await.expect("Failed to list");
        assert_eq!(customers.len(), 1);
    }

    #[tokio::test]
    async fn test_update_customer() {
        let repo = setup_test().await;

        let id = repo
            .store_customer(&sample_customer("1712345678"))
            .await
            .expect("Failed to store customer");

        let mut customer = repo.get_customer(id).await.unwrap().unwrap();
        customer.phone = "0987654321".to_string();
        let updated = repo
            .update_customer(&customer)
            .await
            .expect("Failed to update customer");
        assert!(updated);

        let reloaded = repo.get_customer(id).await.unwrap().unwrap();
        assert_eq!(reloaded.phone, "0987654321");
    }

    #[tokio::test]
    async fn test_delete_customer() {
        let repo = setup_test().await;

        let id = repo
            .store_customer(&sample_customer("1712345678"))
            .await
            .expect("Failed to store customer");

        assert!(repo.delete_customer(id).await.expect("Failed to delete"));
        assert!(repo.get_customer(id).await.unwrap().is_none());

        // Deleting again affects no rows
        assert!(!repo.delete_customer(id).await.expect("Failed to delete"));
    }
}

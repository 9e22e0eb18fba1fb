use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::Row;
use std::str::FromStr;

use crate::storage::db::DbConnection;
use shared::Invoice;

/// Repository for invoice records.
///
/// Invoices are only ever created by the coordinator, together with
/// their reservation; everything after that (consulting, marking paid,
/// standalone deletion) goes through here.
#[derive(Clone)]
pub struct InvoiceRepository {
    db: DbConnection,
}

impl InvoiceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Get an invoice by id
    pub async fn get_invoice(&self, invoice_id: i64) -> Result<Option<Invoice>> {
        let row = sqlx::query(
            r#"
            SELECT id, reservation_id, issue_date, total_amount, status
            FROM invoices
            WHERE id = ?
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// Get the invoice issued for a reservation, if any
    pub async fn get_invoice_by_reservation(&self, reservation_id: i64) -> Result<Option<Invoice>> {
        let row = sqlx::query(
            r#"
            SELECT id, reservation_id, issue_date, total_amount, status
            FROM invoices
            WHERE reservation_id = ?
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// List all invoices ordered by id
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let rows = sqlx::query(
            r#"
            SELECT id, reservation_id, issue_date, total_amount, status
            FROM invoices
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// List the invoices transitively owned by a customer, joining
    /// through reservation ownership
    pub async fn list_invoices_by_customer(&self, customer_id: i64) -> Result<Vec<Invoice>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.reservation_id, i.issue_date, i.total_amount, i.status
            FROM invoices i
            JOIN reservations r ON i.reservation_id = r.id
            WHERE r.customer_id = ?
            ORDER BY i.id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Update an invoice in place; returns true if a row matched
    pub async fn update_invoice(&self, invoice: &Invoice) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET reservation_id = ?, issue_date = ?, total_amount = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(invoice.reservation_id)
        .bind(invoice.issue_date)
        .bind(invoice.total_amount.to_string())
        .bind(&invoice.status)
        .bind(invoice.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an invoice on its own; returns true if a row existed
    pub async fn delete_invoice(&self, invoice_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(invoice_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Invoice> {
        let total_amount: String = row.get("total_amount");
        Ok(Invoice {
            id: row.get("id"),
            reservation_id: row.get("reservation_id"),
            issue_date: row.get("issue_date"),
            total_amount: Decimal::from_str(&total_amount)
                .with_context(|| format!("Invalid stored amount: {}", total_amount))?,
            status: row.get("status"),
        })
    }
}

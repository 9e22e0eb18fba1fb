use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{error, info, warn};

use crate::storage::db::DbConnection;
use shared::NewReservation;

/// Tax rate applied when deriving an invoice amount from a reservation price
pub const TAX_RATE: Decimal = dec!(0.12);

/// Payment status a freshly issued invoice starts with, regardless of
/// the caller-supplied reservation status
const INITIAL_INVOICE_STATUS: &str = "Pending";

/// Invoice amount for a reservation price: price plus tax, fixed to cents
pub fn invoice_total(price: Decimal) -> Decimal {
    (price * (Decimal::ONE + TAX_RATE)).round_dp(2)
}

/// Coordinator owning the reservation/invoice consistency invariant.
///
/// A reservation and its invoice are created and removed as one unit of
/// work; no caller ever observes one without the other. This is the only
/// component allowed to insert into either table.
#[derive(Clone)]
pub struct BookingCoordinator {
    db: DbConnection,
}

impl BookingCoordinator {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Create a reservation together with its invoice in one transaction.
    ///
    /// The invoice is issued today, amounts to the reservation price plus
    /// tax, and starts as Pending. Returns the store-assigned reservation
    /// id. Any failure (including the store rejecting an unknown
    /// customer) rolls back both inserts.
    pub async fn create_reservation_with_invoice(&self, new: &NewReservation) -> Result<i64> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO reservations (customer_id, reservation_date, destination, travel_date, price, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.customer_id)
        .bind(new.reservation_date)
        .bind(&new.destination)
        .bind(new.travel_date)
        .bind(new.price.to_string())
        .bind(&new.status)
        .execute(&mut *tx)
        .await?;

        let reservation_id = result.last_insert_rowid();
        let total_amount = invoice_total(new.price);

        sqlx::query(
            r#"
            INSERT INTO invoices (reservation_id, issue_date, total_amount, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(reservation_id)
        .bind(Local::now().date_naive())
        .bind(total_amount.to_string())
        .bind(INITIAL_INVOICE_STATUS)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Created reservation {} with invoice, total amount {}",
            reservation_id, total_amount
        );

        Ok(reservation_id)
    }

    /// Delete a reservation together with its invoice in one transaction.
    ///
    /// A reservation without an invoice (created outside the coordinator)
    /// is still deletable. Returns false, leaving the store unchanged,
    /// when the reservation does not exist or any statement fails; no
    /// error escapes this boundary.
    pub async fn delete_reservation_with_invoice(&self, reservation_id: i64) -> bool {
        match self.try_delete(reservation_id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("Cascade delete of reservation {} failed: {:?}", reservation_id, e);
                false
            }
        }
    }

    async fn try_delete(&self, reservation_id: i64) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        // Zero rows is fine here: the reservation may predate invoicing
        sqlx::query("DELETE FROM invoices WHERE reservation_id = ?")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            warn!("Reservation not found, rolling back: {}", reservation_id);
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;

        info!("Deleted reservation {} with its invoice", reservation_id);

        Ok(true)
    }
}

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::Row;
use std::str::FromStr;

use crate::storage::db::DbConnection;
use shared::Reservation;

/// Repository for reservation records.
///
/// Creation and cascade deletion go through the coordinator; this
/// repository only covers the single-table reads and writes.
#[derive(Clone)]
pub struct ReservationRepository {
    db: DbConnection,
}

impl ReservationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Get a reservation by id
    pub async fn get_reservation(&self, reservation_id: i64) -> Result<Option<Reservation>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, reservation_date, destination, travel_date, price, status
            FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| Self::map_row(&r)).transpose()
    }

    /// List all reservations ordered by id
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, reservation_date, destination, travel_date, price, status
            FROM reservations
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// List the reservations owned by one customer
    pub async fn list_reservations_by_customer(&self, customer_id: i64) -> Result<Vec<Reservation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, reservation_date, destination, travel_date, price, status
            FROM reservations
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Update a reservation in place; returns true if a row matched.
    ///
    /// Never touches the invoice: a price change after invoicing does not
    /// re-derive the invoiced amount.
    pub async fn update_reservation(&self, reservation: &Reservation) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET customer_id = ?, reservation_date = ?, destination = ?, travel_date = ?, price = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(reservation.customer_id)
        .bind(reservation.reservation_date)
        .bind(&reservation.destination)
        .bind(reservation.travel_date)
        .bind(reservation.price.to_string())
        .bind(&reservation.status)
        .bind(reservation.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Reservation> {
        let price: String = row.get("price");
        Ok(Reservation {
            id: row.get("id"),
            customer_id: row.get("customer_id"),
            reservation_date: row.get("reservation_date"),
            destination: row.get("destination"),
            travel_date: row.get("travel_date"),
            price: Decimal::from_str(&price)
                .with_context(|| format!("Invalid stored price: {}", price))?,
            status: row.get("status"),
        })
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered customer of the agency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identifier
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// National identity document, exactly 10 digits, unique across customers
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// A travel reservation owned by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned identifier
    pub id: i64,
    /// ID of the customer this reservation belongs to
    pub customer_id: i64,
    /// Date the reservation was taken
    pub reservation_date: NaiveDate,
    pub destination: String,
    /// Date of travel, never earlier than the reservation date
    pub travel_date: NaiveDate,
    /// Price before tax
    pub price: Decimal,
    /// Free-form label (e.g. Pending/Confirmed/Cancelled/Completed)
    pub status: String,
}

/// The financial record issued alongside a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Store-assigned identifier
    pub id: i64,
    /// ID of the reservation this invoice belongs to (one invoice per reservation)
    pub reservation_id: i64,
    pub issue_date: NaiveDate,
    /// Reservation price plus tax, fixed to 2 decimal places
    pub total_amount: Decimal,
    /// Free-form payment label (e.g. Pending/Paid/Voided)
    pub status: String,
}

/// Reservation fields after validation, ready for insertion.
///
/// Dates and price arrive from the presentation layer as strings; the
/// validation layer parses them into this shape before anything touches
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub customer_id: i64,
    pub reservation_date: NaiveDate,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub price: Decimal,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Full-replace customer update; every field is re-validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_id: i64,
    /// Reservation date as YYYY-MM-DD
    pub reservation_date: String,
    pub destination: String,
    /// Travel date as YYYY-MM-DD
    pub travel_date: String,
    /// Price in string form (unsigned, at most 2 decimal places)
    pub price: String,
    pub status: String,
}

/// Full-replace reservation update; does not touch the invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    pub customer_id: i64,
    pub reservation_date: String,
    pub destination: String,
    pub travel_date: String,
    pub price: String,
    pub status: String,
}

/// Partial invoice update, typically to mark an invoice Paid or Voided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    /// New issue date as YYYY-MM-DD, if changing
    pub issue_date: Option<String>,
    /// New total amount, if changing
    pub total_amount: Option<Decimal>,
    /// New payment status label, if changing
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerListResponse {
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<Invoice>,
}

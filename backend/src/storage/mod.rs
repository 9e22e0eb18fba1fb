//! # Storage Module
//!
//! Persistence layer for the travel agency backend: the SQLite
//! connection, one repository per table, and the coordinator that owns
//! the reservation/invoice cascade.

pub mod coordinator;
pub mod customer_repository;
pub mod db;
pub mod invoice_repository;
pub mod reservation_repository;

pub use coordinator::{invoice_total, BookingCoordinator, TAX_RATE};
pub use customer_repository::CustomerRepository;
pub use db::DbConnection;
pub use invoice_repository::InvoiceRepository;
pub use reservation_repository::ReservationRepository;

//! # Domain Module
//!
//! Use-case services for customers, reservations and invoices, plus the
//! field validation rules they enforce. Validation failures are reported
//! at this boundary before any store mutation is attempted.

pub mod customer_service;
pub mod invoice_service;
pub mod reservation_service;
pub mod validation;

pub use customer_service::CustomerService;
pub use invoice_service::InvoiceService;
pub use reservation_service::ReservationService;
pub use validation::ValidationError;

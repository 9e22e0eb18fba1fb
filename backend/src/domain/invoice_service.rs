use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::storage::{DbConnection, InvoiceRepository};
use shared::{Invoice, UpdateInvoiceRequest};

/// Service for consulting and amending invoices.
///
/// Issuing an invoice is not exposed here: invoices come into existence
/// only through the reservation cascade.
#[derive(Clone)]
pub struct InvoiceService {
    repository: InvoiceRepository,
}

impl InvoiceService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: InvoiceRepository::new(db),
        }
    }

    /// Get an invoice by id; absence is not an error
    pub async fn get_invoice(&self, invoice_id: i64) -> Result<Option<Invoice>> {
        let invoice = self.repository.get_invoice(invoice_id).await?;

        if invoice.is_none() {
            warn!("Invoice not found: {}", invoice_id);
        }

        Ok(invoice)
    }

    /// Get the single invoice issued for a reservation, if any
    pub async fn get_invoice_by_reservation(&self, reservation_id: i64) -> Result<Option<Invoice>> {
        self.repository.get_invoice_by_reservation(reservation_id).await
    }

    /// List all invoices
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        self.repository.list_invoices().await
    }

    /// List the invoices transitively owned by a customer
    pub async fn list_invoices_by_customer(&self, customer_id: i64) -> Result<Vec<Invoice>> {
        self.repository.list_invoices_by_customer(customer_id).await
    }

    /// Apply a partial update to an invoice, typically marking it Paid or
    /// Voided
    pub async fn update_invoice(
        &self,
        invoice_id: i64,
        request: UpdateInvoiceRequest,
    ) -> Result<Invoice> {
        info!("Updating invoice: {}", invoice_id);

        let mut invoice = self
            .repository
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| anyhow!("Invoice not found: {}", invoice_id))?;

        if let Some(issue_date) = request.issue_date {
            invoice.issue_date = NaiveDate::parse_from_str(issue_date.trim(), "%Y-%m-%d")
                .map_err(|_| anyhow!("Issue date must be in YYYY-MM-DD format"))?;
        }
        if let Some(total_amount) = request.total_amount {
            invoice.total_amount = total_amount.round_dp(2);
        }
        if let Some(status) = request.status {
            invoice.status = status;
        }

        if !self.repository.update_invoice(&invoice).await? {
            return Err(anyhow!("Invoice not found: {}", invoice_id));
        }

        info!("Updated invoice {}", invoice_id);

        Ok(invoice)
    }

    /// Delete an invoice on its own, leaving its reservation in place
    pub async fn delete_invoice(&self, invoice_id: i64) -> Result<()> {
        info!("Deleting invoice: {}", invoice_id);

        if !self.repository.delete_invoice(invoice_id).await? {
            return Err(anyhow!("Invoice not found: {}", invoice_id));
        }

        info!("Deleted invoice {}", invoice_id);

        Ok(())
    }
}

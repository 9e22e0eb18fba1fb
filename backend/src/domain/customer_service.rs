use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::domain::validation;
use crate::storage::{CustomerRepository, DbConnection};
use shared::{CreateCustomerRequest, Customer, UpdateCustomerRequest};

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    repository: CustomerRepository,
}

impl CustomerService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: CustomerRepository::new(db),
        }
    }

    /// Create a new customer after validating every field and checking
    /// that no other customer holds the same national id
    pub async fn create_customer(&self, request: CreateCustomerRequest) -> Result<Customer> {
        info!(
            "Creating customer: {} {}",
            request.first_name, request.last_name
        );

        validation::validate_customer(
            &request.first_name,
            &request.last_name,
            &request.national_id,
            &request.phone,
            &request.email,
            &request.address,
        )?;

        if self.national_id_taken(&request.national_id, None).await? {
            return Err(anyhow!(
                "A customer with national id {} already exists",
                request.national_id
            ));
        }

        let customer_id = self.repository.store_customer(&request).await?;
        let customer = self
            .repository
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| anyhow!("Customer not found after insert: {}", customer_id))?;

        info!("Created customer with id {}", customer.id);

        Ok(customer)
    }

    /// Get a customer by id; absence is not an error
    pub async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let customer = self.repository.get_customer(customer_id).await?;

        if customer.is_none() {
            warn!("Customer not found: {}", customer_id);
        }

        Ok(customer)
    }

    /// List all customers
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.repository.list_customers().await
    }

    /// Replace every field of an existing customer. The national id must
    /// not collide with any other customer, but keeping one's own is fine.
    pub async fn update_customer(
        &self,
        customer_id: i64,
        request: UpdateCustomerRequest,
    ) -> Result<Customer> {
        info!("Updating customer: {}", customer_id);

        validation::validate_customer(
            &request.first_name,
            &request.last_name,
            &request.national_id,
            &request.phone,
            &request.email,
            &request.address,
        )?;

        if self
            .national_id_taken(&request.national_id, Some(customer_id))
            .await?
        {
            return Err(anyhow!(
                "Another customer with national id {} already exists",
                request.national_id
            ));
        }

        let customer = Customer {
            id: customer_id,
            first_name: request.first_name,
            last_name: request.last_name,
            national_id: request.national_id,
            phone: request.phone,
            email: request.email,
            address: request.address,
        };

        if !self.repository.update_customer(&customer).await? {
            return Err(anyhow!("Customer not found: {}", customer_id));
        }

        info!("Updated customer {}", customer_id);

        Ok(customer)
    }

    /// Delete a customer. Reservations referencing it are left in place
    /// as weak references.
    pub async fn delete_customer(&self, customer_id: i64) -> Result<()> {
        info!("Deleting customer: {}", customer_id);

        if !self.repository.delete_customer(customer_id).await? {
            return Err(anyhow!("Customer not found: {}", customer_id));
        }

        info!("Deleted customer {}", customer_id);

        Ok(())
    }

    /// Scan all customers for a national id collision, optionally
    /// excluding one record (for updates against itself)
    async fn national_id_taken(&self, national_id: &str, exclude_id: Option<i64>) -> Result<bool> {
        let customers = self.repository.list_customers().await?;
        Ok(customers
            .iter()
            .any(|c| c.national_id == national_id && Some(c.id) != exclude_id))
    }
}

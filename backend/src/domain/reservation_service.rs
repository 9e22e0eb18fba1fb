use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::domain::validation;
use crate::storage::{BookingCoordinator, DbConnection, ReservationRepository};
use shared::{CreateReservationRequest, NewReservation, Reservation, UpdateReservationRequest};

/// Service for managing reservations.
///
/// Creation and deletion delegate to the coordinator so the paired
/// invoice stays consistent; plain updates and reads bypass it.
#[derive(Clone)]
pub struct ReservationService {
    repository: ReservationRepository,
    coordinator: BookingCoordinator,
}

impl ReservationService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: ReservationRepository::new(db.clone()),
            coordinator: BookingCoordinator::new(db),
        }
    }

    /// Create a reservation and its invoice in one unit of work
    pub async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<Reservation> {
        info!(
            "Creating reservation for customer {} to {}",
            request.customer_id, request.destination
        );

        let validated = validation::validate_reservation(
            &request.destination,
            &request.reservation_date,
            &request.travel_date,
            &request.price,
        )?;

        let new = NewReservation {
            customer_id: request.customer_id,
            reservation_date: validated.reservation_date,
            destination: request.destination.trim().to_string(),
            travel_date: validated.travel_date,
            price: validated.price,
            status: request.status,
        };

        let reservation_id = self.coordinator.create_reservation_with_invoice(&new).await?;

        self.repository
            .get_reservation(reservation_id)
            .await?
            .ok_or_else(|| anyhow!("Reservation not found after insert: {}", reservation_id))
    }

    /// Get a reservation by id; absence is not an error
    pub async fn get_reservation(&self, reservation_id: i64) -> Result<Option<Reservation>> {
        let reservation = self.repository.get_reservation(reservation_id).await?;

        if reservation.is_none() {
            warn!("Reservation not found: {}", reservation_id);
        }

        Ok(reservation)
    }

    /// List all reservations
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        self.repository.list_reservations().await
    }

    /// List the reservations owned by one customer
    pub async fn list_reservations_by_customer(&self, customer_id: i64) -> Result<Vec<Reservation>> {
        self.repository.list_reservations_by_customer(customer_id).await
    }

    /// Replace every field of an existing reservation. The invoice is
    /// left untouched.
    pub async fn update_reservation(
        &self,
        reservation_id: i64,
        request: UpdateReservationRequest,
    ) -> Result<Reservation> {
        info!("Updating reservation: {}", reservation_id);

        let validated = validation::validate_reservation(
            &request.destination,
            &request.reservation_date,
            &request.travel_date,
            &request.price,
        )?;

        let reservation = Reservation {
            id: reservation_id,
            customer_id: request.customer_id,
            reservation_date: validated.reservation_date,
            destination: request.destination.trim().to_string(),
            travel_date: validated.travel_date,
            price: validated.price,
            status: request.status,
        };

        if !self.repository.update_reservation(&reservation).await? {
            return Err(anyhow!("Reservation not found: {}", reservation_id));
        }

        info!("Updated reservation {}", reservation_id);

        Ok(reservation)
    }

    /// Delete a reservation and its invoice in one unit of work
    pub async fn delete_reservation(&self, reservation_id: i64) -> Result<()> {
        info!("Deleting reservation: {}", reservation_id);

        if !self
            .coordinator
            .delete_reservation_with_invoice(reservation_id)
            .await
        {
            return Err(anyhow!(
                "Reservation not found or could not be deleted: {}",
                reservation_id
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CustomerRepository, InvoiceRepository};
    use rust_decimal_macros::dec;
    use shared::CreateCustomerRequest;

    async fn setup_test() -> (ReservationService, DbConnection, i64) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");

        let customer_id = CustomerRepository::new(db.clone())
            .store_customer(&CreateCustomerRequest {
                first_name: "Lucia".to_string(),
                last_name: "Vera".to_string(),
                national_id: "1700112233".to_string(),
                phone: "0990011223".to_string(),
                email: "lucia@example.com".to_string(),
                address: "Calle Sucre 10".to_string(),
            })
            .await
            .expect("Failed to seed customer");

        (ReservationService::new(db.clone()), db, customer_id)
    }

    fn sample_request(customer_id: i64) -> CreateReservationRequest {
        CreateReservationRequest {
            customer_id,
            reservation_date: "2025-03-01".to_string(),
            destination: "Cuenca".to_string(),
            travel_date: "2025-04-15".to_string(),
            price: "2000.00".to_string(),
            status: "Pending".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_reservation_issues_invoice() {
        let (service, db, customer_id) = setup_test().await;
        let invoices = InvoiceRepository::new(db);

        let reservation = service
            .create_reservation(sample_request(customer_id))
            .await
            .expect("Failed to create reservation");

        assert_eq!(reservation.price, dec!(2000.00));

        let invoice = invoices
            .get_invoice_by_reservation(reservation.id)
            .await
            .expect("Failed to query invoice")
            .expect("Invoice should have been issued");
        assert_eq!(invoice.total_amount, dec!(2240.00));
        assert_eq!(invoice.status, "Pending");
    }

    #[tokio::test]
    async fn test_bad_date_ordering_rejected_before_any_write() {
        let (service, _db, customer_id) = setup_test().await;

        let mut request = sample_request(customer_id);
        request.travel_date = "2025-02-01".to_string();

        assert!(service.create_reservation(request).await.is_err());
        assert!(service
            .list_reservations()
            .await
            .expect("Failed to list")
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_for_unknown_customer_fails() {
        let (service, _db, _) = setup_test().await;

        assert!(service.create_reservation(sample_request(999)).await.is_err());
        assert!(service
            .list_reservations()
            .await
            .expect("Failed to list")
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_does_not_touch_invoice() {
        let (service, db, customer_id) = setup_test().await;
        let invoices = InvoiceRepository::new(db);

        let reservation = service
            .create_reservation(sample_request(customer_id))
            .await
            .expect("Failed to create reservation");
        let invoice_before = invoices
            .get_invoice_by_reservation(reservation.id)
            .await
            .unwrap()
            .unwrap();

        let updated = service
            .update_reservation(
                reservation.id,
                UpdateReservationRequest {
                    customer_id,
                    reservation_date: "2025-03-01".to_string(),
                    destination: "Loja".to_string(),
                    travel_date: "2025-05-01".to_string(),
                    price: "3500.00".to_string(),
                    status: "Confirmed".to_string(),
                },
            )
            .await
            .expect("Failed to update reservation");

        assert_eq!(updated.destination, "Loja");
        assert_eq!(updated.price, dec!(3500.00));

        // The invoiced amount still reflects the original price
        let invoice_after = invoices
            .get_invoice_by_reservation(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(invoice_after, invoice_before);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_invoice() {
        let (service, db, customer_id) = setup_test().await;
        let invoices = InvoiceRepository::new(db);

        let reservation = service
            .create_reservation(sample_request(customer_id))
            .await
            .expect("Failed to create reservation");

        service
            .delete_reservation(reservation.id)
            .await
            .expect("Failed to delete reservation");

        assert!(service
            .get_reservation(reservation.id)
            .await
            .unwrap()
            .is_none());
        assert!(invoices
            .get_invoice_by_reservation(reservation.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_reservation_fails() {
        let (service, _db, _) = setup_test().await;
        assert!(service.delete_reservation(999).await.is_err());
    }

    #[tokio::test]
    async fn test_listing_by_customer_filters_ownership() {
        let (service, db, first_customer) = setup_test().await;

        // Second customer with their own reservations
        let second_customer = CustomerRepository::new(db)
            .store_customer(&CreateCustomerRequest {
                first_name: "Pedro".to_string(),
                last_name: "Salas".to_string(),
                national_id: "0955667788".to_string(),
                phone: "0988776655".to_string(),
                email: "pedro@example.com".to_string(),
                address: "Av. Quito 9".to_string(),
            })
            .await
            .expect("Failed to seed second customer");

        for customer_id in [first_customer, first_customer, second_customer] {
            service
                .create_reservation(sample_request(customer_id))
                .await
                .expect("Failed to create reservation");
        }

        let first_list = service
            .list_reservations_by_customer(first_customer)
            .await
            .expect("Failed to list");
        assert_eq!(first_list.len(), 2);
        assert!(first_list.iter().all(|r| r.customer_id == first_customer));

        let second_list = service
            .list_reservations_by_customer(second_customer)
            .await
            .expect("Failed to list");
        assert_eq!(second_list.len(), 1);
        assert_eq!(second_list[0].customer_id, second_customer);
    }
}

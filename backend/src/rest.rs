use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::{CustomerService, InvoiceService, ReservationService};
use crate::storage::DbConnection;
use shared::{
    CreateCustomerRequest, CreateReservationRequest, CustomerListResponse, InvoiceListResponse,
    ReservationListResponse, UpdateCustomerRequest, UpdateInvoiceRequest,
    UpdateReservationRequest,
};

/// Application state containing the domain services. This is the only
/// surface the presentation layer talks to; handlers never touch the
/// store directly.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: CustomerService,
    pub reservation_service: ReservationService,
    pub invoice_service: InvoiceService,
}

impl AppState {
    /// Create application state with all services wired to one store
    pub fn new(db: DbConnection) -> Self {
        Self {
            customer_service: CustomerService::new(db.clone()),
            reservation_service: ReservationService::new(db.clone()),
            invoice_service: InvoiceService::new(db),
        }
    }
}

/// Query parameters for the reservation list endpoint
#[derive(Deserialize, Debug)]
pub struct ReservationListQuery {
    pub customer_id: Option<i64>,
}

/// Query parameters for the invoice list endpoint
#[derive(Deserialize, Debug)]
pub struct InvoiceListQuery {
    pub customer_id: Option<i64>,
    pub reservation_id: Option<i64>,
}

/// Axum handler for GET /api/customers
pub async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/customers");

    match state.customer_service.list_customers().await {
        Ok(customers) => (StatusCode::OK, Json(CustomerListResponse { customers })).into_response(),
        Err(e) => {
            tracing::error!("Error listing customers: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing customers").into_response()
        }
    }
}

/// Axum handler for POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> impl IntoResponse {
    info!("POST /api/customers - national_id: {}", request.national_id);

    match state.customer_service.create_customer(request).await {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Axum handler for GET /api/customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/customers/{}", customer_id);

    match state.customer_service.get_customer(customer_id).await {
        Ok(Some(customer)) => (StatusCode::OK, Json(customer)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Customer not found").into_response(),
        Err(e) => {
            tracing::error!("Error retrieving customer: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving customer").into_response()
        }
    }
}

/// Axum handler for PUT /api/customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(request): Json<UpdateCustomerRequest>,
) -> impl IntoResponse {
    info!("PUT /api/customers/{}", customer_id);

    match state.customer_service.update_customer(customer_id, request).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Axum handler for DELETE /api/customers/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/customers/{}", customer_id);

    match state.customer_service.delete_customer(customer_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

/// Axum handler for GET /api/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationListQuery>,
) -> impl IntoResponse {
    info!("GET /api/reservations - query: {:?}", query);

    let result = match query.customer_id {
        Some(customer_id) => {
            state
                .reservation_service
                .list_reservations_by_customer(customer_id)
                .await
        }
        None => state.reservation_service.list_reservations().await,
    };

    match result {
        Ok(reservations) => {
            (StatusCode::OK, Json(ReservationListResponse { reservations })).into_response()
        }
        Err(e) => {
            tracing::error!("Error listing reservations: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing reservations").into_response()
        }
    }
}

/// Axum handler for POST /api/reservations.
///
/// Creating a reservation also issues its invoice; both appear or
/// neither does.
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> impl IntoResponse {
    info!("POST /api/reservations - request: {:?}", request);

    match state.reservation_service.create_reservation(request).await {
        Ok(reservation) => (StatusCode::CREATED, Json(reservation)).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Axum handler for GET /api/reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/reservations/{}", reservation_id);

    match state.reservation_service.get_reservation(reservation_id).await {
        Ok(Some(reservation)) => (StatusCode::OK, Json(reservation)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Reservation not found").into_response(),
        Err(e) => {
            tracing::error!("Error retrieving reservation: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving reservation").into_response()
        }
    }
}

/// Axum handler for PUT /api/reservations/:id
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
    Json(request): Json<UpdateReservationRequest>,
) -> impl IntoResponse {
    info!("PUT /api/reservations/{}", reservation_id);

    match state
        .reservation_service
        .update_reservation(reservation_id, request)
        .await
    {
        Ok(reservation) => (StatusCode::OK, Json(reservation)).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Axum handler for DELETE /api/reservations/:id (cascades to the invoice)
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/reservations/{}", reservation_id);

    match state.reservation_service.delete_reservation(reservation_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

/// Axum handler for GET /api/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> impl IntoResponse {
    info!("GET /api/invoices - query: {:?}", query);

    let result = if let Some(reservation_id) = query.reservation_id {
        state
            .invoice_service
            .get_invoice_by_reservation(reservation_id)
            .await
            .map(|invoice| invoice.into_iter().collect())
    } else if let Some(customer_id) = query.customer_id {
        state.invoice_service.list_invoices_by_customer(customer_id).await
    } else {
        state.invoice_service.list_invoices().await
    };

    match result {
        Ok(invoices) => (StatusCode::OK, Json(InvoiceListResponse { invoices })).into_response(),
        Err(e) => {
            tracing::error!("Error listing invoices: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing invoices").into_response()
        }
    }
}

/// Axum handler for GET /api/invoices/:id
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/invoices/{}", invoice_id);

    match state.invoice_service.get_invoice(invoice_id).await {
        Ok(Some(invoice)) => (StatusCode::OK, Json(invoice)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Invoice not found").into_response(),
        Err(e) => {
            tracing::error!("Error retrieving invoice: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving invoice").into_response()
        }
    }
}

/// Axum handler for PUT /api/invoices/:id
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/invoices/{}", invoice_id);

    match state.invoice_service.update_invoice(invoice_id, request).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Axum handler for DELETE /api/invoices/:id
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/invoices/{}", invoice_id);

    match state.invoice_service.delete_invoice(invoice_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

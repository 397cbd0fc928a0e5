use crate::application::usecases::invoices::InvoiceUseCase;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::invoices::{CreateInvoiceModel, UpdateInvoiceStatusModel};
use crate::infrastructure::memory::repositories::invoices::InvoiceInMemory;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    status: Option<String>,
    customer: Option<String>,
}

pub fn routes(repository: Arc<InvoiceInMemory>) -> Router {
    let invoices_usecase = InvoiceUseCase::new(repository);

    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id/status", patch(update_invoice_status))
        .with_state(Arc::new(invoices_usecase))
}

pub async fn create_invoice<T>(
    State(invoices_usecase): State<Arc<InvoiceUseCase<T>>>,
    Json(body): Json<CreateInvoiceModel>,
) -> impl IntoResponse
where
    T: InvoiceRepository + Send + Sync + 'static,
{
    info!("invoices: create request received");
    match invoices_usecase.create(body).await {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_invoice<T>(
    State(invoices_usecase): State<Arc<InvoiceUseCase<T>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse
where
    T: InvoiceRepository + Send + Sync + 'static,
{
    info!(%id, "invoices: get request received");
    match invoices_usecase.get(id).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_invoices<T>(
    State(invoices_usecase): State<Arc<InvoiceUseCase<T>>>,
    Query(query): Query<ListInvoicesQuery>,
) -> impl IntoResponse
where
    T: InvoiceRepository + Send + Sync + 'static,
{
    info!(
        status = ?query.status,
        customer = ?query.customer,
        "invoices: list request received"
    );
    match invoices_usecase.list(query.status, query.customer).await {
        Ok(invoices) => Json(invoices).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_invoice_status<T>(
    State(invoices_usecase): State<Arc<InvoiceUseCase<T>>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateInvoiceStatusModel>,
) -> impl IntoResponse
where
    T: InvoiceRepository + Send + Sync + 'static,
{
    info!(%id, "invoices: update status request received");
    let status = match body.status {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            return (StatusCode::BAD_REQUEST, "status is required".to_string()).into_response();
        }
    };

    match invoices_usecase.update_status(id, &status).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => err.into_response(),
    }
}

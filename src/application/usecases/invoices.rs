use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::entities::invoices::InsertInvoiceEntity;
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;
use crate::domain::value_objects::invoices::{
    CreateInvoiceModel, InvoiceModel, ListInvoicesFilter,
};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("customer_name is required")]
    MissingCustomerName,
    #[error("amount is required")]
    MissingAmount,
    #[error("amount must be >= 0")]
    NegativeAmount,
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invoice {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl InvoiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceError::MissingCustomerName
            | InvoiceError::MissingAmount
            | InvoiceError::NegativeAmount
            | InvoiceError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            InvoiceError::NotFound(_) => StatusCode::NOT_FOUND,
            InvoiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, InvoiceError>;

pub struct InvoiceUseCase<T>
where
    T: InvoiceRepository + Send + Sync + 'static,
{
    invoice_repository: Arc<T>,
}

impl<T> InvoiceUseCase<T>
where
    T: InvoiceRepository + Send + Sync + 'static,
{
    pub fn new(invoice_repository: Arc<T>) -> Self {
        Self { invoice_repository }
    }

    /// Validates and stores a new draft invoice. Validation runs before the
    /// store is touched, so a rejected create never consumes an identifier.
    pub async fn create(&self, body: CreateInvoiceModel) -> UseCaseResult<InvoiceModel> {
        info!("invoices: create invoice requested");

        let customer_name = match body.customer_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                let err = InvoiceError::MissingCustomerName;
                warn!(
                    status = err.status_code().as_u16(),
                    "invoices: create rejected, customer name missing or blank"
                );
                return Err(err);
            }
        };

        let amount = match body.amount {
            Some(amount) => amount,
            None => {
                let err = InvoiceError::MissingAmount;
                warn!(
                    status = err.status_code().as_u16(),
                    "invoices: create rejected, amount missing"
                );
                return Err(err);
            }
        };
        if amount < Decimal::ZERO {
            let err = InvoiceError::NegativeAmount;
            warn!(
                %amount,
                status = err.status_code().as_u16(),
                "invoices: create rejected, amount is negative"
            );
            return Err(err);
        }

        let invoice = self
            .invoice_repository
            .insert(InsertInvoiceEntity {
                customer_name,
                amount,
                status: InvoiceStatus::default(),
            })
            .await
            .map_err(|err| {
                error!(store_error = ?err, "invoices: failed to insert invoice");
                InvoiceError::Internal(err)
            })?;

        info!(invoice_id = invoice.id, %amount, "invoices: invoice created");
        Ok(InvoiceModel::from(invoice))
    }

    pub async fn get(&self, id: i64) -> UseCaseResult<InvoiceModel> {
        info!(%id, "invoices: get invoice requested");

        let invoice = self
            .invoice_repository
            .find_by_id(id)
            .await
            .map_err(|err| {
                error!(%id, store_error = ?err, "invoices: failed to load invoice");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = InvoiceError::NotFound(id);
                warn!(
                    %id,
                    status = err.status_code().as_u16(),
                    "invoices: invoice not found"
                );
                err
            })?;

        Ok(InvoiceModel::from(invoice))
    }

    /// Lists invoices ordered by creation time (ids break ties). Blank filter
    /// strings count as absent; both filters are case-insensitive.
    pub async fn list(
        &self,
        status: Option<String>,
        customer: Option<String>,
    ) -> UseCaseResult<Vec<InvoiceModel>> {
        info!(?status, ?customer, "invoices: list invoices requested");

        let status_filter = match status.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => match InvoiceStatus::from_str(raw) {
                Some(parsed) => Some(parsed),
                None => {
                    // Unknown status values match no invoices; they never fail the request.
                    info!(unknown_status = raw, "invoices: unknown status filter");
                    return Ok(Vec::new());
                }
            },
            None => None,
        };
        let customer_contains = customer.filter(|raw| !raw.trim().is_empty());

        let invoices = self
            .invoice_repository
            .list(ListInvoicesFilter {
                status: status_filter,
                customer_contains,
            })
            .await
            .map_err(|err| {
                error!(store_error = ?err, "invoices: failed to list invoices");
                InvoiceError::Internal(err)
            })?;

        let invoice_count = invoices.len();
        info!(invoice_count, "invoices: invoices listed");
        Ok(invoices.into_iter().map(InvoiceModel::from).collect())
    }

    pub async fn update_status(&self, id: i64, status: &str) -> UseCaseResult<InvoiceModel> {
        info!(%id, next_status = status, "invoices: update invoice status requested");

        // An unknown id reports not-found even when the status text is invalid.
        self.invoice_repository
            .find_by_id(id)
            .await
            .map_err(|err| {
                error!(%id, store_error = ?err, "invoices: failed to load invoice");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = InvoiceError::NotFound(id);
                warn!(
                    %id,
                    status = err.status_code().as_u16(),
                    "invoices: invoice not found"
                );
                err
            })?;

        let next_status = InvoiceStatus::from_str(status.trim()).ok_or_else(|| {
            let err = InvoiceError::InvalidStatus(status.trim().to_string());
            warn!(
                %id,
                next_status = status,
                status = err.status_code().as_u16(),
                "invoices: unknown status value"
            );
            err
        })?;

        let invoice = self
            .invoice_repository
            .update_status(id, next_status)
            .await
            .map_err(|err| {
                error!(%id, store_error = ?err, "invoices: failed to update invoice status");
                InvoiceError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = InvoiceError::NotFound(id);
                warn!(
                    %id,
                    status = err.status_code().as_u16(),
                    "invoices: invoice not found"
                );
                err
            })?;

        info!(%id, next_status = %next_status, "invoices: invoice status updated");
        Ok(InvoiceModel::from(invoice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::invoices::InvoiceEntity;
    use crate::domain::repositories::invoices::MockInvoiceRepository;
    use crate::infrastructure::memory::repositories::invoices::InvoiceInMemory;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_invoice(id: i64) -> InvoiceEntity {
        InvoiceEntity {
            id,
            customer_name: "Acme Corp".to_string(),
            amount: Decimal::new(4999, 2),
            status: InvoiceStatus::Draft,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_stores_a_draft_invoice() {
        let mut invoice_repo = MockInvoiceRepository::new();

        let expected_insert = InsertInvoiceEntity {
            customer_name: "Acme Corp".to_string(),
            amount: Decimal::new(4999, 2),
            status: InvoiceStatus::Draft,
        };
        invoice_repo
            .expect_insert()
            .with(eq(expected_insert))
            .returning(|insert| {
                Box::pin(async move {
                    Ok(InvoiceEntity {
                        id: 1,
                        customer_name: insert.customer_name,
                        amount: insert.amount,
                        status: insert.status,
                        created_at: Utc::now(),
                    })
                })
            });

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let invoice = usecase
            .create(CreateInvoiceModel {
                customer_name: Some("Acme Corp".to_string()),
                amount: Some(Decimal::new(4999, 2)),
            })
            .await
            .unwrap();

        assert_eq!(invoice.id, 1);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
    }

    #[tokio::test]
    async fn create_without_customer_name_is_rejected() {
        let invoice_repo = MockInvoiceRepository::new();
        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase
            .create(CreateInvoiceModel {
                customer_name: None,
                amount: Some(Decimal::new(100, 0)),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::MissingCustomerName));
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn create_with_blank_customer_name_is_rejected() {
        let invoice_repo = MockInvoiceRepository::new();
        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase
            .create(CreateInvoiceModel {
                customer_name: Some("   ".to_string()),
                amount: Some(Decimal::new(100, 0)),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::MissingCustomerName));
    }

    #[tokio::test]
    async fn create_without_amount_is_rejected() {
        let invoice_repo = MockInvoiceRepository::new();
        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase
            .create(CreateInvoiceModel {
                customer_name: Some("Acme Corp".to_string()),
                amount: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::MissingAmount));
    }

    #[tokio::test]
    async fn create_with_negative_amount_is_rejected() {
        let invoice_repo = MockInvoiceRepository::new();
        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase
            .create(CreateInvoiceModel {
                customer_name: Some("Acme Corp".to_string()),
                amount: Some(Decimal::new(-1, 2)),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::NegativeAmount));
    }

    #[tokio::test]
    async fn get_returns_invoice_when_present() {
        let mut invoice_repo = MockInvoiceRepository::new();

        let stored = sample_invoice(7);
        invoice_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(move |_| {
                let invoice = stored.clone();
                Box::pin(async move { Ok(Some(invoice)) })
            });

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let invoice = usecase.get(7).await.unwrap();
        assert_eq!(invoice.id, 7);
        assert_eq!(invoice.customer_name, "Acme Corp");
    }

    #[tokio::test]
    async fn get_reports_not_found_for_unknown_id() {
        let mut invoice_repo = MockInvoiceRepository::new();

        invoice_repo
            .expect_find_by_id()
            .with(eq(42))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase.get(42).await.unwrap_err();
        assert!(matches!(err, InvoiceError::NotFound(42)));
        assert_eq!(err.status_code().as_u16(), 404);
    }

    #[tokio::test]
    async fn list_parses_filters_case_insensitively() {
        let mut invoice_repo = MockInvoiceRepository::new();

        let expected_filter = ListInvoicesFilter {
            status: Some(InvoiceStatus::Paid),
            customer_contains: Some("acme".to_string()),
        };
        invoice_repo
            .expect_list()
            .with(eq(expected_filter))
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let invoices = usecase
            .list(Some("PaId".to_string()), Some("acme".to_string()))
            .await
            .unwrap();
        assert!(invoices.is_empty());
    }

    #[tokio::test]
    async fn list_with_unknown_status_returns_empty_without_store_lookup() {
        // No expectation is set, so any repository call would panic.
        let invoice_repo = MockInvoiceRepository::new();
        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let invoices = usecase
            .list(Some("archived".to_string()), None)
            .await
            .unwrap();
        assert!(invoices.is_empty());
    }

    #[tokio::test]
    async fn list_treats_blank_filters_as_absent() {
        let mut invoice_repo = MockInvoiceRepository::new();

        invoice_repo
            .expect_list()
            .with(eq(ListInvoicesFilter::default()))
            .returning(|_| {
                Box::pin(async { Ok(vec![sample_invoice(1), sample_invoice(2)]) })
            });

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let invoices = usecase
            .list(Some("  ".to_string()), Some(String::new()))
            .await
            .unwrap();
        assert_eq!(invoices.len(), 2);
    }

    #[tokio::test]
    async fn update_status_reports_not_found_before_parsing_status() {
        let mut invoice_repo = MockInvoiceRepository::new();

        invoice_repo
            .expect_find_by_id()
            .with(eq(42))
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase.update_status(42, "bogus").await.unwrap_err();
        assert!(matches!(err, InvoiceError::NotFound(42)));
    }

    #[tokio::test]
    async fn update_status_with_unknown_status_leaves_store_untouched() {
        let mut invoice_repo = MockInvoiceRepository::new();

        let stored = sample_invoice(5);
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(move |_| {
                let invoice = stored.clone();
                Box::pin(async move { Ok(Some(invoice)) })
            });

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let err = usecase.update_status(5, "archived").await.unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidStatus(_)));
        assert_eq!(err.to_string(), "invalid status: archived");
    }

    #[tokio::test]
    async fn update_status_accepts_mixed_case_status() {
        let mut invoice_repo = MockInvoiceRepository::new();

        let stored = sample_invoice(5);
        invoice_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(move |_| {
                let invoice = stored.clone();
                Box::pin(async move { Ok(Some(invoice)) })
            });
        invoice_repo
            .expect_update_status()
            .with(eq(5), eq(InvoiceStatus::Paid))
            .returning(|id, status| {
                Box::pin(async move {
                    let mut invoice = sample_invoice(id);
                    invoice.status = status;
                    Ok(Some(invoice))
                })
            });

        let usecase = InvoiceUseCase::new(Arc::new(invoice_repo));

        let invoice = usecase.update_status(5, "PAID").await.unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn rejected_create_does_not_consume_an_id() {
        let repository = Arc::new(InvoiceInMemory::new());
        let usecase = InvoiceUseCase::new(Arc::clone(&repository));

        let err = usecase
            .create(CreateInvoiceModel {
                customer_name: Some(String::new()),
                amount: Some(Decimal::new(100, 0)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, InvoiceError::MissingCustomerName));

        let invoice = usecase
            .create(CreateInvoiceModel {
                customer_name: Some("Acme Corp".to_string()),
                amount: Some(Decimal::new(100, 0)),
            })
            .await
            .unwrap();
        assert_eq!(invoice.id, 1);

        let invoices = usecase.list(None, None).await.unwrap();
        assert_eq!(invoices.len(), 1);
    }

    #[tokio::test]
    async fn created_invoice_round_trips_through_get() {
        let repository = Arc::new(InvoiceInMemory::new());
        let usecase = InvoiceUseCase::new(Arc::clone(&repository));

        let created = usecase
            .create(CreateInvoiceModel {
                customer_name: Some("Acme Corp".to_string()),
                amount: Some(Decimal::new(4999, 2)),
            })
            .await
            .unwrap();

        let fetched = usecase.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::invoices::InvoiceEntity;
use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceModel {
    pub id: i64,
    pub customer_name: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

impl From<InvoiceEntity> for InvoiceModel {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            customer_name: value.customer_name,
            amount: value.amount,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

/// Inbound create payload. Both fields stay optional so absence is reported
/// as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceModel {
    pub customer_name: Option<String>,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceStatusModel {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListInvoicesFilter {
    pub status: Option<InvoiceStatus>,
    pub customer_contains: Option<String>,
}

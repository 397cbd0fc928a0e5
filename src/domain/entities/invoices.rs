use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceEntity {
    pub id: i64,
    pub customer_name: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertInvoiceEntity {
    pub customer_name: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
}

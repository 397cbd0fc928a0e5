use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::invoices::{InsertInvoiceEntity, InvoiceEntity};
use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;
use crate::domain::value_objects::invoices::ListInvoicesFilter;

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn insert(&self, invoice: InsertInvoiceEntity) -> Result<InvoiceEntity>;
    async fn find_by_id(&self, id: i64) -> Result<Option<InvoiceEntity>>;
    async fn list(&self, filter: ListInvoicesFilter) -> Result<Vec<InvoiceEntity>>;
    async fn update_status(
        &self,
        id: i64,
        status: InvoiceStatus,
    ) -> Result<Option<InvoiceEntity>>;
}

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::invoices::{InsertInvoiceEntity, InvoiceEntity};
use crate::domain::repositories::invoices::InvoiceRepository;
use crate::domain::value_objects::enums::invoice_statuses::InvoiceStatus;
use crate::domain::value_objects::invoices::ListInvoicesFilter;

/// Process-lifetime invoice store. Identifiers are handed out by an atomic
/// counter starting at 1 and are never reused.
pub struct InvoiceInMemory {
    sequence: AtomicI64,
    invoices: RwLock<HashMap<i64, InvoiceEntity>>,
}

impl InvoiceInMemory {
    pub fn new() -> Self {
        Self {
            sequence: AtomicI64::new(1),
            invoices: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InvoiceInMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvoiceRepository for InvoiceInMemory {
    async fn insert(&self, invoice: InsertInvoiceEntity) -> Result<InvoiceEntity> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst);
        let entity = InvoiceEntity {
            id,
            customer_name: invoice.customer_name,
            amount: invoice.amount,
            status: invoice.status,
            created_at: Utc::now(),
        };

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        invoices.insert(id, entity.clone());

        Ok(entity)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<InvoiceEntity>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(&id).cloned())
    }

    async fn list(&self, filter: ListInvoicesFilter) -> Result<Vec<InvoiceEntity>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let customer_needle = filter.customer_contains.as_deref().map(str::to_lowercase);

        let mut matched: Vec<InvoiceEntity> = invoices
            .values()
            .filter(|invoice| {
                filter.status.is_none_or(|status| invoice.status == status)
                    && customer_needle
                        .as_deref()
                        .is_none_or(|needle| invoice.customer_name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();
        drop(invoices);

        matched.sort_by_key(|invoice| (invoice.created_at, invoice.id));

        Ok(matched)
    }

    async fn update_status(
        &self,
        id: i64,
        status: InvoiceStatus,
    ) -> Result<Option<InvoiceEntity>> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(invoice) = invoices.get_mut(&id) else {
            return Ok(None);
        };
        invoice.status = status;

        Ok(Some(invoice.clone()))
    }
}

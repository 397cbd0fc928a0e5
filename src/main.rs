use anyhow::Result;
use invoice_desk::config::config_loader;
use invoice_desk::infrastructure::axum_http::http_serve;
use invoice_desk::infrastructure::memory::repositories::invoices::InvoiceInMemory;
use invoice_desk::observability;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Server exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("invoice-desk")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let invoice_repository = Arc::new(InvoiceInMemory::new());
    info!("In-memory invoice store has been initialized");

    http_serve::start(Arc::new(dotenvy_env), invoice_repository).await?;

    Ok(())
}

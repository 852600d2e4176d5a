//! Upload storage setup

use anyhow::{Context, Result};
use casfos_core::Config;
use casfos_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the upload adapter backend.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.upload_dir, config.upload_base_url.clone())
        .await
        .context("Failed to initialize local upload storage")?;

    tracing::info!(
        upload_dir = %config.upload_dir,
        base_url = %config.upload_base_url,
        "Upload storage ready"
    );

    Ok(Arc::new(storage))
}

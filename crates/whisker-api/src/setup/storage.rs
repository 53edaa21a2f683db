//! Staging and archive storage setup

use anyhow::{Context, Result};
use std::sync::Arc;
use whisker_core::Config;
use whisker_storage::{LocalStorage, Storage};

/// Create the staging and archive areas, in that order.
pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    let staging = LocalStorage::new(config.staging_dir(), config.staging_base_url())
        .await
        .context("Failed to initialize staging storage")?;
    let archive = LocalStorage::new(config.archive_dir(), config.archive_base_url())
        .await
        .context("Failed to initialize archive storage")?;

    tracing::info!(
        staging_dir = %config.staging_dir(),
        archive_dir = %config.archive_dir(),
        "Local storage initialized"
    );

    Ok((Arc::new(staging), Arc::new(archive)))
}

//! Service wiring

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use whisker_core::Config;
use whisker_db::{ChatRegistry, ChatRepository};
use whisker_processing::{build_scorer, ClassifierAdapter, ImageValidator};
use whisker_storage::Storage;

use crate::services::{
    DetectionPipeline, DisabledNotifier, EmailNotifier, Notifier, RegistrationStore,
};
use crate::state::AppState;

/// Build the detection pipeline and application state.
pub fn initialize_services(
    config: &Config,
    pool: SqlitePool,
    staging: Arc<dyn Storage>,
    archive: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let scorer = build_scorer(config).context("Failed to initialize classifier")?;
    tracing::info!(backend = scorer.name(), "Classifier initialized");

    let notifier: Arc<dyn Notifier> = match EmailNotifier::from_config(config)
        .context("Failed to initialize email notifier")?
    {
        Some(notifier) => Arc::new(notifier),
        None => Arc::new(DisabledNotifier),
    };

    let registry: Arc<dyn ChatRegistry> = Arc::new(ChatRepository::new(pool.clone()));
    let store = RegistrationStore::new(staging.clone(), archive, registry);

    let pipeline = DetectionPipeline::new(
        ImageValidator::default(),
        staging.clone(),
        ClassifierAdapter::new(scorer),
        store,
        notifier,
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        pool,
        pipeline,
        staging,
    }))
}

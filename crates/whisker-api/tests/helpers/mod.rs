//! Test helpers: build AppState and router for integration tests.
//!
//! Each `TestApp` owns a temp directory holding the SQLite file and both
//! file areas, so tests never share state. The classifier and notifier are
//! replaced with in-process doubles.

#![allow(dead_code)]

pub mod doubles;
pub mod fixtures;

use axum_test::TestServer;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use whisker_api::services::{DetectionPipeline, RegistrationStore};
use whisker_api::setup::{database, routes, storage};
use whisker_api::state::AppState;
use whisker_core::Config;
use whisker_db::{ChatRegistry, ChatRepository};
use whisker_processing::{ClassifierAdapter, ImageValidator};
use whisker_storage::Storage;

use doubles::{FailingRegistry, FailingStorage, RecordingNotifier, StubScorer};

/// Test application: server, doubles, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub scorer: Arc<StubScorer>,
    pub notifier: Arc<RecordingNotifier>,
    pub repository: ChatRepository,
    staging_dir: PathBuf,
    archive_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// File names currently in the staging area
    pub fn staged_files(&self) -> Vec<String> {
        list_files(&self.staging_dir)
    }

    /// File names currently in the archive area
    pub fn archived_files(&self) -> Vec<String> {
        list_files(&self.archive_dir)
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    pub async fn row_count(&self) -> i64 {
        self.repository.count().await.expect("count rows")
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Builds a [`TestApp`] with configurable doubles.
pub struct TestAppBuilder {
    scorer: Arc<StubScorer>,
    notifier: Arc<RecordingNotifier>,
    failing_archive: bool,
    failing_registry: bool,
    max_file_size_mb: Option<usize>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            scorer: StubScorer::returning(0.0),
            notifier: RecordingNotifier::succeeding(),
            failing_archive: false,
            failing_registry: false,
            max_file_size_mb: None,
        }
    }

    pub fn score(mut self, score: f32) -> Self {
        self.scorer = StubScorer::returning(score);
        self
    }

    pub fn failing_scorer(mut self) -> Self {
        self.scorer = StubScorer::failing();
        self
    }

    pub fn failing_notifier(mut self) -> Self {
        self.notifier = RecordingNotifier::failing();
        self
    }

    pub fn failing_archive(mut self) -> Self {
        self.failing_archive = true;
        self
    }

    pub fn failing_registry(mut self) -> Self {
        self.failing_registry = true;
        self
    }

    pub fn max_file_size_mb(mut self, mb: usize) -> Self {
        self.max_file_size_mb = Some(mb);
        self
    }

    pub async fn build(self) -> TestApp {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let staging_dir = temp_dir.path().join("uploads");
        let archive_dir = temp_dir.path().join("enregistres");

        let mut vars: HashMap<&str, String> = HashMap::new();
        vars.insert(
            "DATABASE_URL",
            format!("sqlite://{}", temp_dir.path().join("whisker.db").display()),
        );
        vars.insert("STAGING_DIR", staging_dir.display().to_string());
        vars.insert("ARCHIVE_DIR", archive_dir.display().to_string());
        vars.insert("ENVIRONMENT", "test".to_string());
        if let Some(mb) = self.max_file_size_mb {
            vars.insert("MAX_FILE_SIZE_MB", mb.to_string());
        }
        let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("test config");

        let pool = database::setup_database(&config)
            .await
            .expect("Failed to set up test database");
        let (staging, archive) = storage::setup_storage(&config)
            .await
            .expect("Failed to set up test storage");

        let archive: Arc<dyn Storage> = if self.failing_archive {
            Arc::new(FailingStorage)
        } else {
            archive
        };
        let repository = ChatRepository::new(pool.clone());
        let registry: Arc<dyn ChatRegistry> = if self.failing_registry {
            Arc::new(FailingRegistry)
        } else {
            Arc::new(repository.clone())
        };

        let store = RegistrationStore::new(staging.clone(), archive, registry);
        let pipeline = DetectionPipeline::new(
            ImageValidator::default(),
            staging.clone(),
            ClassifierAdapter::new(self.scorer.clone()),
            store,
            self.notifier.clone(),
        );

        let state = Arc::new(AppState {
            config: config.clone(),
            pool,
            pipeline,
            staging,
        });

        let router = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
        let server = TestServer::new(router).expect("Failed to start test server");

        TestApp {
            server,
            state,
            scorer: self.scorer,
            notifier: self.notifier,
            repository,
            staging_dir,
            archive_dir,
            _temp_dir: temp_dir,
        }
    }
}

/// Test app whose classifier always returns `score`.
pub async fn setup_test_app(score: f32) -> TestApp {
    TestAppBuilder::new().score(score).build().await
}

use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

// NAME_MAX minus the `.` and `.part` of the temporary write name
const MAX_KEY_LENGTH: usize = 249;

/// A directory on the local filesystem, served under `base_url`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Open the area rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Init(format!("cannot create {}: {}", root.display(), e))
        })?;

        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.root
    }

    /// Keys are single file names; anything that could name another directory is refused.
    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let refused = key.is_empty()
            || key.len() > MAX_KEY_LENGTH
            || key.starts_with('.')
            || key.contains("..")
            || key.contains(['/', '\\', '\0']);
        if refused {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_with_key(
        &self,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.path_for(key)?;
        // Written under a temporary name so a half-written file is never served.
        let partial = self.root.join(format!(".{}.part", key));
        let started = std::time::Instant::now();

        let mut file = fs::File::create(&partial)
            .await
            .map_err(|e| StorageError::Write(format!("{}: {}", partial.display(), e)))?;
        file.write_all(&data)
            .await
            .map_err(|e| StorageError::Write(format!("{}: {}", partial.display(), e)))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::Write(format!("{}: {}", partial.display(), e)))?;
        drop(file);

        if let Err(e) = fs::rename(&partial, &path).await {
            let _ = fs::remove_file(&partial).await;
            return Err(StorageError::Write(format!("{}: {}", path.display(), e)));
        }

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Stored file"
        );

        Ok(self.url_for(key))
    }

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::Read(format!("{}: {}", path.display(), e))),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

use super::traits::OutputStore;
use crate::error::{MigrationError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Output directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }
}

#[async_trait::async_trait]
impl OutputStore for FsStore {
    async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| MigrationError::io(self.root.display().to_string(), e))
    }

    async fn write(&self, file: &str, contents: Vec<u8>) -> Result<()> {
        let path = self.path_of(file);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| MigrationError::io(path.display().to_string(), e))
    }

    async fn read(&self, file: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_of(file);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MigrationError::io(path.display().to_string(), e)),
        }
    }

    async fn exists(&self, file: &str) -> Result<bool> {
        let path = self.path_of(file);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| MigrationError::io(path.display().to_string(), e))
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

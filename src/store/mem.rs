use super::traits::OutputStore;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory output location. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all stored files, sorted
    pub fn file_names(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }

    pub fn remove(&self, file: &str) -> bool {
        self.files.write().remove(file).is_some()
    }
}

#[async_trait::async_trait]
impl OutputStore for MemoryStore {
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    async fn write(&self, file: &str, contents: Vec<u8>) -> Result<()> {
        self.files.write().insert(file.to_string(), contents);
        Ok(())
    }

    async fn read(&self, file: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.read().get(file).cloned())
    }

    async fn exists(&self, file: &str) -> Result<bool> {
        Ok(self.files.read().contains_key(file))
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

use crate::error::{MigrationError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Destination for a run's output files, addressed by bare file name.
///
/// The writer writes through it and the validator reads back through it.
#[async_trait::async_trait]
pub trait OutputStore: Send + Sync {
    /// Make the location ready to receive files, creating it if needed
    async fn prepare(&self) -> Result<()>;
    /// Create or replace a file
    async fn write(&self, file: &str, contents: Vec<u8>) -> Result<()>;
    /// File contents, or `None` when the file does not exist
    async fn read(&self, file: &str) -> Result<Option<Vec<u8>>>;
    async fn exists(&self, file: &str) -> Result<bool>;
    /// Human-readable location for log lines and error messages
    fn location(&self) -> String;
}

/// Serialize `value` as pretty JSON, write it, and return the bytes written.
pub async fn write_json<S, T>(store: &S, file: &str, value: &T) -> Result<Vec<u8>>
where
    S: OutputStore + ?Sized,
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| MigrationError::Json {
        file: file.to_string(),
        source,
    })?;
    store.write(file, bytes.clone()).await?;
    Ok(bytes)
}

/// Read a file back as untyped JSON. A file that exists but does not parse
/// is fatal.
pub async fn read_json_value<S>(store: &S, file: &str) -> Result<Option<Value>>
where
    S: OutputStore + ?Sized,
{
    match store.read(file).await? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| MigrationError::UnreadableFile {
                file: file.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Read a file back into a typed value.
pub async fn read_json<S, T>(store: &S, file: &str) -> Result<Option<T>>
where
    S: OutputStore + ?Sized,
    T: DeserializeOwned,
{
    match read_json_value(store, file).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| MigrationError::UnreadableFile {
                file: file.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

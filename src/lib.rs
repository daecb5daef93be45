pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;

pub use error::{MigrationError, Result};

pub use logic::{
    load_legacy_herbs, MigrationOutput, MigrationPipeline, PersistenceWriter, ValidationError,
    ValidationErrorType, ValidationOutcome, ValidationReport, ValidationWarning,
    ValidationWarningType, Validator,
};

pub use model::*;

pub use store::{FsStore, MemoryStore, OutputStore};

/// Load legacy records, run the pipeline and persist everything to `store`.
pub async fn migrate(
    input: impl AsRef<std::path::Path>,
    store: &dyn OutputStore,
    stamp: BatchStamp,
) -> Result<IndexManifest> {
    let herbs = load_legacy_herbs(input).await?;
    let output = MigrationPipeline::new(stamp.clone()).run(&herbs);
    PersistenceWriter::new(store)
        .write(&output, &stamp, herbs.len())
        .await
}

use crate::error::Result;
use crate::logic::pipeline::MigrationOutput;
use crate::logic::report::render_report;
use crate::model::{
    BatchStamp, IndexManifest, FORMULAS_FILE, GRANULES_FILE, GRANULE_FORMULAS_FILE, INDEX_FILE,
    MATERIALS_FILE, MEDICINES_FILE, RELATIONS_FILE, REPORT_FILE, SLICES_FILE,
};
use crate::store::{write_json, OutputStore};
use log::info;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Hex SHA-256 of a file's bytes, as recorded in the manifest
pub fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Persists one run's output. Writes are sequential and fail fast; files
/// written before a failure are left in place.
pub struct PersistenceWriter<'a> {
    store: &'a dyn OutputStore,
}

impl<'a> PersistenceWriter<'a> {
    pub fn new(store: &'a dyn OutputStore) -> Self {
        Self { store }
    }

    pub async fn write(
        &self,
        output: &MigrationOutput,
        stamp: &BatchStamp,
        legacy_count: usize,
    ) -> Result<IndexManifest> {
        self.store.prepare().await?;
        info!("Writing migration output to {}", self.store.location());

        let mut checksums = BTreeMap::new();
        let mut files = Vec::new();

        self.collection(MATERIALS_FILE, &output.materials, &mut files, &mut checksums)
            .await?;
        self.collection(SLICES_FILE, &output.slices, &mut files, &mut checksums)
            .await?;
        self.collection(FORMULAS_FILE, &output.formulas, &mut files, &mut checksums)
            .await?;
        self.collection(GRANULES_FILE, &output.granules, &mut files, &mut checksums)
            .await?;
        self.collection(
            GRANULE_FORMULAS_FILE,
            &output.granule_formulas,
            &mut files,
            &mut checksums,
        )
        .await?;
        self.collection(MEDICINES_FILE, &output.medicines, &mut files, &mut checksums)
            .await?;

        let manifest = IndexManifest {
            version: stamp.version.clone(),
            created_at: stamp.timestamp,
            run_id: Uuid::new_v4(),
            counts: output.counts(),
            files,
            checksums,
        };
        write_json(self.store, INDEX_FILE, &manifest).await?;
        write_json(self.store, RELATIONS_FILE, &output.relations).await?;

        let report = render_report(&manifest, legacy_count);
        self.store.write(REPORT_FILE, report.into_bytes()).await?;

        info!(
            "Wrote {} collection files, manifest and relations (run {})",
            manifest.files.len(),
            manifest.run_id
        );
        Ok(manifest)
    }

    async fn collection<T: serde::Serialize + Sync>(
        &self,
        file: &str,
        records: &[T],
        files: &mut Vec<String>,
        checksums: &mut BTreeMap<String, String>,
    ) -> Result<()> {
        let bytes = write_json(self.store, file, records).await?;
        info!("  {} ({} records)", file, records.len());
        checksums.insert(file.to_string(), checksum(&bytes));
        files.push(file.to_string());
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const MATERIALS_FILE: &str = "materials.json";
pub const SLICES_FILE: &str = "slices.json";
pub const FORMULAS_FILE: &str = "formulas.json";
pub const GRANULES_FILE: &str = "granules.json";
pub const GRANULE_FORMULAS_FILE: &str = "granule-formulas.json";
pub const MEDICINES_FILE: &str = "medicines.json";
pub const INDEX_FILE: &str = "index.json";
pub const RELATIONS_FILE: &str = "relations.json";
pub const REPORT_FILE: &str = "MIGRATION_REPORT.md";

/// Entity collection files, in write order
pub const COLLECTION_FILES: [&str; 6] = [
    MATERIALS_FILE,
    SLICES_FILE,
    FORMULAS_FILE,
    GRANULES_FILE,
    GRANULE_FORMULAS_FILE,
    MEDICINES_FILE,
];

/// Size of every collection produced by one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCounts {
    pub materials: usize,
    pub slices: usize,
    pub formulas: usize,
    pub granules: usize,
    pub granule_formulas: usize,
    pub medicines: usize,
}

impl CollectionCounts {
    /// Count declared for a collection file, if the file is a collection
    pub fn for_file(&self, file: &str) -> Option<usize> {
        match file {
            MATERIALS_FILE => Some(self.materials),
            SLICES_FILE => Some(self.slices),
            FORMULAS_FILE => Some(self.formulas),
            GRANULES_FILE => Some(self.granules),
            GRANULE_FORMULAS_FILE => Some(self.granule_formulas),
            MEDICINES_FILE => Some(self.medicines),
            _ => None,
        }
    }

    pub fn entries(&self) -> [(&'static str, usize); 6] {
        [
            ("materials", self.materials),
            ("slices", self.slices),
            ("formulas", self.formulas),
            ("granules", self.granules),
            ("granuleFormulas", self.granule_formulas),
            ("medicines", self.medicines),
        ]
    }
}

/// `index.json`: what a run wrote and how much of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexManifest {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub run_id: Uuid,
    pub counts: CollectionCounts,
    pub files: Vec<String>,
    /// SHA-256 of each collection file as written
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

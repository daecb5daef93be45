//! Structural validation of a migration output location.
//!
//! Everything is re-read from the store as untyped JSON, so the checks see
//! exactly what was persisted (and catch hand edits made after the run).
//! A field counts as present when it is JSON-truthy: absent, `null`, `false`,
//! `""` and `0` are all missing.

use crate::error::{MigrationError, Result};
use crate::logic::writer::checksum;
use crate::model::{
    FORMULAS_FILE, GRANULES_FILE, GRANULE_FORMULAS_FILE, INDEX_FILE, MATERIALS_FILE,
    MEDICINES_FILE, RELATIONS_FILE, SLICES_FILE,
};
use crate::store::OutputStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Files that must exist before validation can start
pub const REQUIRED_FILES: [&str; 7] = [
    MATERIALS_FILE,
    SLICES_FILE,
    FORMULAS_FILE,
    GRANULES_FILE,
    MEDICINES_FILE,
    INDEX_FILE,
    RELATIONS_FILE,
];

/// Findings printed per list before the rest are summarized as a count
pub const SUMMARY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub error_type: ValidationErrorType,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub warning_type: ValidationWarningType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorType {
    MissingRequiredField,
    EmptyRequiredList,
    UnknownReference,
    CountMismatch,
    ChecksumMismatch,
    RelationMismatch,
    DuplicateId,
    ManifestMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationWarningType {
    MissingRecommendedField,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Findings for one entity collection (or for the index / relations files)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityValidation {
    pub entity: String,
    pub count: usize,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl EntityValidation {
    pub fn new(entity: impl Into<String>, count: usize) -> Self {
        Self {
            entity: entity.into(),
            count,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn error(&mut self, path: String, error_type: ValidationErrorType, message: impl Into<String>) {
        self.errors.push(ValidationError {
            path,
            error_type,
            message: message.into(),
        });
    }

    fn warning(&mut self, path: String, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path,
            warning_type: ValidationWarningType::MissingRecommendedField,
            message: message.into(),
        });
    }

    /// Error unless `field` is truthy on `record`
    fn require(&mut self, prefix: &str, record: &Value, field: &str, what: &str) -> bool {
        let present = truthy(lookup(record, field));
        if !present {
            self.error(
                format!("{}.{}", prefix, field),
                ValidationErrorType::MissingRequiredField,
                format!("missing {}", what),
            );
        }
        present
    }

    /// Error when the id is missing or was already seen in this collection
    fn require_id(&mut self, prefix: &str, record: &Value, seen: &mut BTreeSet<String>) {
        if let Some(id) = id_of(record) {
            if !seen.insert(id.to_string()) {
                self.error(
                    format!("{}.id", prefix),
                    ValidationErrorType::DuplicateId,
                    format!("duplicate id '{}'", id),
                );
            }
        } else {
            self.require(prefix, record, "id", "id");
        }
    }

    /// Error unless `field` is a non-empty array on `record`
    fn require_list(&mut self, prefix: &str, record: &Value, field: &str, what: &str) -> bool {
        let present = non_empty_list(lookup(record, field));
        if !present {
            self.error(
                format!("{}.{}", prefix, field),
                ValidationErrorType::EmptyRequiredList,
                format!("missing {}", what),
            );
        }
        present
    }

    fn recommend(&mut self, prefix: &str, record: &Value, field: &str, what: &str) {
        if !truthy(lookup(record, field)) {
            self.warning(format!("{}.{}", prefix, field), format!("consider adding {}", what));
        }
    }

    fn recommend_list(&mut self, prefix: &str, record: &Value, field: &str, what: &str) {
        if !non_empty_list(lookup(record, field)) {
            self.warning(format!("{}.{}", prefix, field), format!("consider adding {}", what));
        }
    }

    /// Error when a present reference does not resolve
    fn reference(
        &mut self,
        prefix: &str,
        record: &Value,
        field: &str,
        known: &BTreeSet<String>,
        target: &str,
    ) {
        if let Some(Value::String(id)) = lookup(record, field) {
            if !id.is_empty() && !known.contains(id) {
                self.error(
                    format!("{}.{}", prefix, field),
                    ValidationErrorType::UnknownReference,
                    format!("references unknown {} '{}'", target, id),
                );
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Passed => write!(f, "All checks passed"),
            ValidationOutcome::PassedWithWarnings => {
                write!(f, "Validation passed with warnings that need attention")
            }
            ValidationOutcome::Failed => write!(f, "Validation failed, see errors above"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub entities: Vec<EntityValidation>,
}

impl ValidationReport {
    pub fn total_errors(&self) -> usize {
        self.entities.iter().map(|e| e.errors.len()).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.entities.iter().map(|e| e.warnings.len()).sum()
    }

    pub fn entity(&self, name: &str) -> Option<&EntityValidation> {
        self.entities.iter().find(|e| e.entity == name)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.entities.iter().flat_map(|e| e.errors.iter())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationWarning> {
        self.entities.iter().flat_map(|e| e.warnings.iter())
    }

    pub fn outcome(&self) -> ValidationOutcome {
        if self.total_errors() > 0 {
            ValidationOutcome::Failed
        } else if self.total_warnings() > 0 {
            ValidationOutcome::PassedWithWarnings
        } else {
            ValidationOutcome::Passed
        }
    }

    /// Console summary: the first few findings of each list, the rest counted.
    pub fn render_summary(&self) -> String {
        let mut lines = vec!["Validation summary:".to_string()];
        for entity in &self.entities {
            lines.push(String::new());
            lines.push(format!("{}: {} records", entity.entity, entity.count));
            if !entity.errors.is_empty() {
                lines.push(format!("  errors ({}):", entity.errors.len()));
                push_findings(&mut lines, &entity.errors, "errors");
            }
            if !entity.warnings.is_empty() {
                lines.push(format!("  warnings ({}):", entity.warnings.len()));
                push_findings(&mut lines, &entity.warnings, "warnings");
            }
            if entity.is_clean() {
                lines.push("  ok".to_string());
            }
        }
        lines.push(String::new());
        lines.push("=".repeat(50));
        lines.push(format!(
            "Total: {} errors, {} warnings",
            self.total_errors(),
            self.total_warnings()
        ));
        lines.push(self.outcome().to_string());
        lines.join("\n")
    }
}

fn push_findings<T: fmt::Display>(lines: &mut Vec<String>, findings: &[T], noun: &str) {
    lines.extend(
        findings
            .iter()
            .take(SUMMARY_LIMIT)
            .map(|finding| format!("    - {}", finding)),
    );
    if findings.len() > SUMMARY_LIMIT {
        lines.push(format!(
            "    ... and {} more {}",
            findings.len() - SUMMARY_LIMIT,
            noun
        ));
    }
}

/// A persisted file, kept as raw bytes for checksums and parsed for checks
struct LoadedFile {
    bytes: Vec<u8>,
    value: Value,
}

impl LoadedFile {
    fn records(&self) -> &[Value] {
        self.value.as_array().map(Vec::as_slice).unwrap_or_default()
    }
}

pub struct Validator;

impl Validator {
    /// Validate everything persisted at the store's location.
    ///
    /// Missing required files and unparseable JSON abort with an error;
    /// all other findings are returned in the report.
    pub async fn validate(store: &dyn OutputStore) -> Result<ValidationReport> {
        info!("Validating migration output at {}", store.location());

        let mut missing = Vec::new();
        for file in REQUIRED_FILES {
            if !store.exists(file).await? {
                missing.push(file.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(MigrationError::MissingFiles(missing));
        }

        let materials = load_collection(store, MATERIALS_FILE).await?;
        let slices = load_collection(store, SLICES_FILE).await?;
        let formulas = load_collection(store, FORMULAS_FILE).await?;
        let granules = load_collection(store, GRANULES_FILE).await?;
        let granule_formulas = if store.exists(GRANULE_FORMULAS_FILE).await? {
            Some(load_collection(store, GRANULE_FORMULAS_FILE).await?)
        } else {
            None
        };
        let medicines = load_collection(store, MEDICINES_FILE).await?;
        let index = load_object(store, INDEX_FILE).await?;
        let relations = load_object(store, RELATIONS_FILE).await?;

        let material_ids = ids_of(materials.records());
        let slice_ids = ids_of(slices.records());

        let mut report = ValidationReport::default();
        report.entities.push(check_materials(materials.records()));
        report
            .entities
            .push(check_slices(slices.records(), &material_ids));
        report
            .entities
            .push(check_formulas(formulas.records(), &slice_ids));
        report
            .entities
            .push(check_granules(granules.records(), &slice_ids));
        if let Some(granule_formulas) = &granule_formulas {
            report
                .entities
                .push(check_granule_formulas(granule_formulas.records()));
        }
        report.entities.push(check_medicines(medicines.records()));

        let collections: Vec<(&str, &LoadedFile)> = [
            (MATERIALS_FILE, Some(&materials)),
            (SLICES_FILE, Some(&slices)),
            (FORMULAS_FILE, Some(&formulas)),
            (GRANULES_FILE, Some(&granules)),
            (GRANULE_FORMULAS_FILE, granule_formulas.as_ref()),
            (MEDICINES_FILE, Some(&medicines)),
        ]
        .into_iter()
        .filter_map(|(file, loaded)| loaded.map(|loaded| (file, loaded)))
        .collect();
        report.entities.push(check_index(&index.value, &collections));
        report.entities.push(check_relations(
            &relations.value,
            &material_ids,
            slices.records(),
            formulas.records(),
        ));

        if report.total_errors() > 0 {
            warn!(
                "Validation found {} errors and {} warnings",
                report.total_errors(),
                report.total_warnings()
            );
        } else {
            info!("Validation finished with {} warnings", report.total_warnings());
        }
        Ok(report)
    }
}

async fn load(store: &dyn OutputStore, file: &str) -> Result<LoadedFile> {
    let bytes = store
        .read(file)
        .await?
        .ok_or_else(|| MigrationError::MissingFiles(vec![file.to_string()]))?;
    let value = serde_json::from_slice(&bytes).map_err(|e| MigrationError::UnreadableFile {
        file: file.to_string(),
        reason: e.to_string(),
    })?;
    Ok(LoadedFile { bytes, value })
}

async fn load_collection(store: &dyn OutputStore, file: &str) -> Result<LoadedFile> {
    let loaded = load(store, file).await?;
    if !loaded.value.is_array() {
        return Err(MigrationError::UnreadableFile {
            file: file.to_string(),
            reason: "expected a JSON array".to_string(),
        });
    }
    Ok(loaded)
}

async fn load_object(store: &dyn OutputStore, file: &str) -> Result<LoadedFile> {
    let loaded = load(store, file).await?;
    if !loaded.value.is_object() {
        return Err(MigrationError::UnreadableFile {
            file: file.to_string(),
            reason: "expected a JSON object".to_string(),
        });
    }
    Ok(loaded)
}

/// JavaScript truthiness of an optional JSON value
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn non_empty_list(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

/// Dotted field lookup, e.g. `names.cn`
fn lookup<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    field
        .split('.')
        .try_fold(record, |value, key| value.get(key))
}

fn id_of(record: &Value) -> Option<&str> {
    record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

fn ids_of(records: &[Value]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(id_of)
        .map(str::to_string)
        .collect()
}

/// `Entity[id]`, or `Entity[index]` when the record has no usable id
fn record_path(entity: &str, record: &Value, index: usize) -> String {
    match id_of(record) {
        Some(id) => format!("{}[{}]", entity, id),
        None => format!("{}[{}]", entity, index),
    }
}

fn check_materials(records: &[Value]) -> EntityValidation {
    let mut result = EntityValidation::new("Materials", records.len());
    let mut seen = BTreeSet::new();
    for (index, material) in records.iter().enumerate() {
        let path = record_path("Material", material, index);
        result.require_id(&path, material, &mut seen);
        result.require(&path, material, "names.cn", "Chinese name");
        result.require(&path, material, "names.pinyin", "pinyin");

        result.recommend(&path, material, "names.latin", "a Latin name");
        result.recommend_list(&path, material, "chemicalComponents", "chemical components");
        result.recommend_list(&path, material, "qualityStandards", "quality standards");
    }
    result
}

fn check_slices(records: &[Value], material_ids: &BTreeSet<String>) -> EntityValidation {
    let mut result = EntityValidation::new("Slices", records.len());
    let mut seen = BTreeSet::new();
    for (index, slice) in records.iter().enumerate() {
        let path = record_path("Slice", slice, index);
        result.require_id(&path, slice, &mut seen);
        if result.require(&path, slice, "materialId", "material id") {
            result.reference(&path, slice, "materialId", material_ids, "material");
        }
        result.require(&path, slice, "processing.method", "processing method");

        result.recommend_list(&path, slice, "qc", "QC indicators");
        result.recommend(&path, slice, "storage", "storage conditions");
    }
    result
}

fn check_formulas(records: &[Value], slice_ids: &BTreeSet<String>) -> EntityValidation {
    let mut result = EntityValidation::new("Formulas", records.len());
    let mut seen = BTreeSet::new();
    for (index, formula) in records.iter().enumerate() {
        let path = record_path("Formula", formula, index);
        result.require_id(&path, formula, &mut seen);
        result.require(&path, formula, "name", "name");
        result.require(&path, formula, "pinyin", "pinyin");
        result.require(&path, formula, "source", "source");
        if result.require_list(&path, formula, "components", "components") {
            let components = lookup(formula, "components")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for (i, component) in components.iter().enumerate() {
                let component_path = format!("{}.components[{}]", path, i);
                if result.require(&component_path, component, "sliceId", "slice id") {
                    result.reference(&component_path, component, "sliceId", slice_ids, "slice");
                }
                result.require(&component_path, component, "weight.value", "weight");
                result.require(&component_path, component, "role", "role");
            }
        }

        result.recommend(&path, formula, "explanation", "an explanation");
        result.recommend(&path, formula, "modernApplications", "modern applications");
    }
    result
}

fn check_granules(records: &[Value], slice_ids: &BTreeSet<String>) -> EntityValidation {
    let mut result = EntityValidation::new("GranuleIngredients", records.len());
    let mut seen = BTreeSet::new();
    for (index, granule) in records.iter().enumerate() {
        let path = record_path("GranuleIngredient", granule, index);
        result.require_id(&path, granule, &mut seen);
        if result.require(&path, granule, "sliceId", "slice id") {
            result.reference(&path, granule, "sliceId", slice_ids, "slice");
        }
        if result.require(&path, granule, "extraction", "extraction process") {
            result.require(&path, granule, "extraction.solvent", "extraction solvent");
            result.require(&path, granule, "extraction.ratio", "material to liquid ratio");
        }

        result.recommend_list(
            &path,
            granule,
            "quality.activeComponents",
            "active component content",
        );
    }
    result
}

fn check_granule_formulas(records: &[Value]) -> EntityValidation {
    let mut result = EntityValidation::new("GranuleFormulas", records.len());
    let mut seen = BTreeSet::new();
    for (index, formula) in records.iter().enumerate() {
        let path = record_path("GranuleFormula", formula, index);
        result.require_id(&path, formula, &mut seen);
        result.require(&path, formula, "prescriptionNo", "prescription number");
        result.require(&path, formula, "hospital", "hospital");
        result.require(&path, formula, "doctor", "doctor");
        if result.require_list(&path, formula, "ingredients", "granule ingredients") {
            let ingredients = lookup(formula, "ingredients")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for (i, ingredient) in ingredients.iter().enumerate() {
                let ingredient_path = format!("{}.ingredients[{}]", path, i);
                result.require(&ingredient_path, ingredient, "ingredientId", "granule id");
                result.require(&ingredient_path, ingredient, "dosage", "dosage");
            }
        }
        result.require(&path, formula, "usage", "usage");

        result.recommend(&path, formula, "compatibility", "a compatibility analysis");
    }
    result
}

fn check_medicines(records: &[Value]) -> EntityValidation {
    let mut result = EntityValidation::new("PatentMedicines", records.len());
    let mut seen = BTreeSet::new();
    for (index, medicine) in records.iter().enumerate() {
        let path = record_path("PatentMedicine", medicine, index);
        result.require_id(&path, medicine, &mut seen);
        result.require(&path, medicine, "name.cn", "Chinese name");
        result.require(&path, medicine, "approval.number", "approval number");
        result.require(&path, medicine, "manufacturer.name", "manufacturer");
        result.require(&path, medicine, "formulation.dosageForm", "dosage form");
        result.require_list(&path, medicine, "clinical.functions", "functions and indications");
        result.require(&path, medicine, "clinical.usage", "usage and dosage");

        result.recommend_list(&path, medicine, "qualityStandards", "quality standards");
        result.recommend(&path, medicine, "pricing", "pricing");
    }
    result
}

/// Manifest file list, counts and checksums against the collection files on disk
fn check_index(index: &Value, collections: &[(&str, &LoadedFile)]) -> EntityValidation {
    let listed = index.get("files").and_then(Value::as_array);
    let declared: Vec<&str> = listed
        .map(|files| files.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let mut result = EntityValidation::new("Index", declared.len());
    let counts = index.get("counts");
    let checksums = index.get("checksums").and_then(Value::as_object);

    if listed.is_none() {
        result.error(
            "Index.files".to_string(),
            ValidationErrorType::MissingRequiredField,
            "missing file list",
        );
    }
    if checksums.is_none() {
        result.error(
            "Index.checksums".to_string(),
            ValidationErrorType::MissingRequiredField,
            "missing checksum map",
        );
    }

    for file in &declared {
        if !collections.iter().any(|(name, _)| name == file) {
            result.error(
                format!("Index.files.{}", file),
                ValidationErrorType::ManifestMismatch,
                format!("{} is declared but was not found", file),
            );
        }
    }

    for (file, loaded) in collections {
        if listed.is_some() && !declared.contains(file) {
            result.error(
                format!("Index.files.{}", file),
                ValidationErrorType::ManifestMismatch,
                format!("{} is not declared in the manifest", file),
            );
        }

        let key = count_key(file);
        let actual = loaded.records().len();
        match counts.and_then(|c| c.get(key)).and_then(Value::as_u64) {
            Some(stated) if stated as usize == actual => {}
            Some(stated) => result.error(
                format!("Index.counts.{}", key),
                ValidationErrorType::CountMismatch,
                format!("declares {} records but {} holds {}", stated, file, actual),
            ),
            None => result.error(
                format!("Index.counts.{}", key),
                ValidationErrorType::MissingRequiredField,
                format!("missing count for {}", file),
            ),
        }

        let Some(checksums) = checksums else { continue };
        match checksums.get(*file).and_then(Value::as_str) {
            Some(expected) if expected == checksum(&loaded.bytes) => {}
            Some(_) => result.error(
                format!("Index.checksums.{}", file),
                ValidationErrorType::ChecksumMismatch,
                format!("{} changed after it was written", file),
            ),
            None => result.error(
                format!("Index.checksums.{}", file),
                ValidationErrorType::MissingRequiredField,
                format!("missing checksum for {}", file),
            ),
        }
    }
    result
}

/// Manifest key for a collection file, e.g. `granule-formulas.json` -> `granuleFormulas`
fn count_key(file: &str) -> &'static str {
    match file {
        MATERIALS_FILE => "materials",
        SLICES_FILE => "slices",
        FORMULAS_FILE => "formulas",
        GRANULES_FILE => "granules",
        GRANULE_FORMULAS_FILE => "granuleFormulas",
        _ => "medicines",
    }
}

type RelationMap = BTreeMap<String, Vec<String>>;

/// Group `(key, id)` pairs into an insertion-ordered, duplicate-free relation map
fn rebuild<'a, I>(pairs: I) -> RelationMap
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut map = RelationMap::new();
    for (key, id) in pairs {
        let ids = map.entry(key.to_string()).or_default();
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    map
}

fn check_relations(
    relations: &Value,
    material_ids: &BTreeSet<String>,
    slices: &[Value],
    formulas: &[Value],
) -> EntityValidation {
    let persisted = |key: &str| -> Option<RelationMap> {
        relations
            .get(key)
            .and_then(|map| serde_json::from_value(map.clone()).ok())
    };
    let material_to_slices = persisted("materialToSlices");
    let slice_to_formulas = persisted("sliceToFormulas");

    let mut result = EntityValidation::new(
        "Relations",
        material_to_slices.as_ref().map_or(0, BTreeMap::len),
    );

    let expected_material_to_slices = rebuild(slices.iter().filter_map(|slice| {
        let material = slice.get("materialId").and_then(Value::as_str)?;
        Some((material, id_of(slice)?))
    }));
    let expected_slice_to_formulas = rebuild(formulas.iter().flat_map(|formula| {
        let components = formula
            .get("components")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        components.iter().filter_map(move |component| {
            let slice = component.get("sliceId").and_then(Value::as_str)?;
            Some((slice, id_of(formula)?))
        })
    }));

    match &material_to_slices {
        Some(map) => {
            for material in material_ids {
                if map.get(material).map_or(true, Vec::is_empty) {
                    result.error(
                        format!("Relations.materialToSlices[{}]", material),
                        ValidationErrorType::RelationMismatch,
                        "material has no slices",
                    );
                }
            }
            if *map != expected_material_to_slices {
                result.error(
                    "Relations.materialToSlices".to_string(),
                    ValidationErrorType::RelationMismatch,
                    "does not match the slices collection",
                );
            }
        }
        None => result.error(
            "Relations.materialToSlices".to_string(),
            ValidationErrorType::MissingRequiredField,
            "missing or malformed material to slices map",
        ),
    }

    match &slice_to_formulas {
        Some(map) if *map != expected_slice_to_formulas => result.error(
            "Relations.sliceToFormulas".to_string(),
            ValidationErrorType::RelationMismatch,
            "does not match the formulas collection",
        ),
        Some(_) => {}
        None => result.error(
            "Relations.sliceToFormulas".to_string(),
            ValidationErrorType::MissingRequiredField,
            "missing or malformed slice to formulas map",
        ),
    }
    result
}

use crate::error::{MigrationError, Result};
use crate::logic::build::{build_formula, build_material, build_slices};
use crate::logic::sequence::SequenceAllocator;
use crate::model::{
    BatchStamp, CollectionCounts, Formula, GranuleFormula, GranuleIngredient, LegacyHerb,
    Material, PatentMedicine, RelationIndex, Slice,
};
use itertools::Itertools;
use log::{debug, info, warn};
use serde_json::Value;
use std::path::Path;

pub const SLICE_ID_PREFIX: &str = "slice";
pub const FORMULA_ID_PREFIX: &str = "formula";

/// Everything one run produces, before persistence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationOutput {
    pub materials: Vec<Material>,
    pub slices: Vec<Slice>,
    pub formulas: Vec<Formula>,
    pub granules: Vec<GranuleIngredient>,
    pub granule_formulas: Vec<GranuleFormula>,
    pub medicines: Vec<PatentMedicine>,
    pub relations: RelationIndex,
}

impl MigrationOutput {
    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            materials: self.materials.len(),
            slices: self.slices.len(),
            formulas: self.formulas.len(),
            granules: self.granules.len(),
            granule_formulas: self.granule_formulas.len(),
            medicines: self.medicines.len(),
        }
    }
}

/// One migration run. Owns its ID allocators.
pub struct MigrationPipeline {
    stamp: BatchStamp,
    slice_ids: SequenceAllocator,
    formula_ids: SequenceAllocator,
}

impl MigrationPipeline {
    pub fn new(stamp: BatchStamp) -> Self {
        Self {
            stamp,
            slice_ids: SequenceAllocator::new(SLICE_ID_PREFIX),
            formula_ids: SequenceAllocator::new(FORMULA_ID_PREFIX),
        }
    }

    /// Run all stages over the legacy records, in input order.
    pub fn run(&mut self, herbs: &[LegacyHerb]) -> MigrationOutput {
        info!("Migrating {} legacy herb records", herbs.len());
        for id in herbs.iter().map(|herb| herb.id.as_str()).duplicates() {
            warn!("Legacy id {} is used by more than one record", id);
        }

        let materials: Vec<Material> = herbs
            .iter()
            .map(|herb| build_material(herb, &self.stamp))
            .collect();
        info!("Built {} materials", materials.len());

        let mut slices = Vec::new();
        // Index into `slices` of the last slice built for each material
        let mut last_slice = Vec::with_capacity(materials.len());
        for (herb, material) in herbs.iter().zip(&materials) {
            let built = build_slices(herb, material, &self.stamp, &mut self.slice_ids);
            debug!("Material {} -> {} slice(s)", material.id(), built.len());
            slices.extend(built);
            last_slice.push(slices.len() - 1);
        }
        info!("Built {} slices", slices.len());

        let mut formulas = Vec::new();
        for (herb, slice_index) in herbs.iter().zip(&last_slice) {
            if let Some(formula) =
                build_formula(herb, &slices[*slice_index], &self.stamp, &mut self.formula_ids)
            {
                debug!("Seeded formula {} from {}", formula.id(), herb.id);
                formulas.push(formula);
            }
        }
        info!("Built {} formulas", formulas.len());

        let relations = RelationIndex::build(&slices, &formulas);

        MigrationOutput {
            materials,
            slices,
            formulas,
            relations,
            ..Default::default()
        }
    }
}

/// Parse legacy records from JSON text. The top level must be an array of objects.
pub fn parse_legacy_herbs(source: &str, text: &str) -> Result<Vec<LegacyHerb>> {
    let invalid = |reason: String| MigrationError::InvalidInput {
        path: source.to_string(),
        reason,
    };

    let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
    let records = match value {
        Value::Array(records) => records,
        other => return Err(invalid(format!("expected a JSON array, found {}", kind(&other)))),
    };
    if let Some(position) = records.iter().position(|record| !record.is_object()) {
        return Err(invalid(format!(
            "record {} is {}, expected an object",
            position,
            kind(&records[position])
        )));
    }

    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            serde_json::from_value(record)
                .map_err(|e| invalid(format!("record {}: {}", position, e)))
        })
        .collect()
}

/// Read legacy records from a file.
pub async fn load_legacy_herbs(path: impl AsRef<Path>) -> Result<Vec<LegacyHerb>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MigrationError::io(display.clone(), e))?;

    let herbs = parse_legacy_herbs(&display, &text)?;
    info!("Loaded {} legacy records from {}", herbs.len(), display);
    Ok(herbs)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flavor, HerbRole, ProcessingCategory, Qi};
    use chrono::DateTime;

    fn stamp() -> BatchStamp {
        BatchStamp::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap(), "1.0.0")
    }

    const SAMPLE: &str = r#"[
        {
            "id": "guizhi",
            "name": "桂枝",
            "pinyin": "guizhi",
            "nature": "微温",
            "taste": ["辛", "微苦"],
            "category": "解表药",
            "functions": ["发汗解肌"],
            "indications": ["风寒感冒"],
            "images": [],
            "primaryImage": "",
            "compatibilityInfo": {
                "commonCombinations": [
                    {"herbs": ["桂枝", "白芍"], "function": "调和营卫", "indications": ["营卫不和"]}
                ]
            }
        },
        {
            "id": "huangqi",
            "name": "黄芪",
            "pinyin": "huangqi",
            "nature": "温",
            "taste": ["甘"],
            "category": "补虚药",
            "functions": [],
            "indications": [],
            "processing": ["蜜炙", "生用"],
            "images": [],
            "primaryImage": "",
            "compatibilityInfo": {
                "commonCombinations": [
                    {"herbs": ["黄芪", "当归"], "source": "当归补血汤", "indications": []}
                ]
            }
        },
        {
            "id": "gancao",
            "name": "甘草",
            "pinyin": "gancao",
            "nature": "平",
            "taste": null,
            "category": null
        }
    ]"#;

    #[test]
    fn test_single_herb_end_to_end() {
        let herbs = parse_legacy_herbs("sample", SAMPLE).unwrap();
        let output = MigrationPipeline::new(stamp()).run(&herbs[..1]);

        assert_eq!(output.materials.len(), 1);
        assert_eq!(output.materials[0].qi, Qi::Warm);
        assert_eq!(output.materials[0].flavor, vec![Flavor::Pungent, Flavor::Bitter]);

        assert_eq!(output.slices.len(), 1);
        assert_eq!(output.slices[0].processing.method, "净制");
        assert_eq!(output.slices[0].processing.category, ProcessingCategory::Cleaning);

        assert_eq!(output.formulas.len(), 1);
        let component = &output.formulas[0].components[0];
        assert_eq!(component.slice_id, output.slices[0].node.id);
        assert_eq!(component.role, HerbRole::Monarch);
    }

    #[test]
    fn test_formula_references_last_slice_of_own_material() {
        let herbs = parse_legacy_herbs("sample", SAMPLE).unwrap();
        let output = MigrationPipeline::new(stamp()).run(&herbs);

        let slice_ids: Vec<&str> = output.slices.iter().map(|s| s.id()).collect();
        assert_eq!(slice_ids, vec!["slice_1", "slice_2", "slice_3", "slice_4"]);

        let formula_ids: Vec<&str> = output.formulas.iter().map(|f| f.id()).collect();
        assert_eq!(formula_ids, vec!["formula_1", "formula_2"]);
        assert_eq!(output.formulas[0].components[0].slice_id, "slice_1");
        assert_eq!(output.formulas[1].components[0].slice_id, "slice_3");
    }

    #[test]
    fn test_every_material_has_slices_in_relations() {
        let herbs = parse_legacy_herbs("sample", SAMPLE).unwrap();
        let output = MigrationPipeline::new(stamp()).run(&herbs);

        for material in &output.materials {
            let expected: Vec<&str> = output
                .slices
                .iter()
                .filter(|s| s.material_id == material.node.id)
                .map(|s| s.id())
                .collect();
            assert!(!expected.is_empty());
            assert_eq!(output.relations.slices_for_material(material.id()), expected);
        }
        assert_eq!(output.relations.formulas_for_slice("slice_3"), ["formula_2"]);
    }

    #[test]
    fn test_counts_and_empty_product_collections() {
        let herbs = parse_legacy_herbs("sample", SAMPLE).unwrap();
        let output = MigrationPipeline::new(stamp()).run(&herbs);
        let counts = output.counts();

        assert_eq!(counts.materials, 3);
        assert_eq!(counts.slices, 4);
        assert_eq!(counts.formulas, 2);
        assert_eq!(counts.granules, 0);
        assert_eq!(counts.granule_formulas, 0);
        assert_eq!(counts.medicines, 0);
    }

    #[test]
    fn test_duplicate_legacy_ids_are_kept_one_to_one() {
        let herbs = parse_legacy_herbs(
            "dup",
            r#"[
                {"id": "dup", "name": "黄芪", "pinyin": "huangqi", "nature": "温", "taste": ["甘"]},
                {"id": "dup", "name": "甘草", "pinyin": "gancao", "nature": "平", "taste": ["甘"]}
            ]"#,
        )
        .unwrap();
        let output = MigrationPipeline::new(stamp()).run(&herbs);

        let ids: Vec<&str> = output.materials.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["dup", "dup"]);
        assert_eq!(output.relations.slices_for_material("dup"), ["slice_1", "slice_2"]);
    }

    #[test]
    fn test_separate_pipelines_do_not_share_sequences() {
        let herbs = parse_legacy_herbs("sample", SAMPLE).unwrap();
        let first = MigrationPipeline::new(stamp()).run(&herbs);
        let second = MigrationPipeline::new(stamp()).run(&herbs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_produces_empty_output() {
        let output = MigrationPipeline::new(stamp()).run(&[]);
        assert_eq!(output, MigrationOutput::default());
    }

    #[test]
    fn test_parse_rejects_non_array_input() {
        let err = parse_legacy_herbs("herbs.json", r#"{"id": "guizhi"}"#).unwrap_err();
        assert!(matches!(err, MigrationError::InvalidInput { .. }));

        let err = parse_legacy_herbs("herbs.json", r#"[{"id": "guizhi"}, 3]"#).unwrap_err();
        assert!(err.to_string().contains("record 1"));

        let err = parse_legacy_herbs("herbs.json", "not json").unwrap_err();
        assert!(matches!(err, MigrationError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_legacy_herbs(dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::Io { .. }));
    }
}

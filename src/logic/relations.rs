use crate::model::{Formula, Id, RelationIndex, Slice};
use std::collections::BTreeMap;

impl RelationIndex {
    /// Derive the index from the final collections.
    ///
    /// Pure: the same slices and formulas always yield an equal index.
    pub fn build(slices: &[Slice], formulas: &[Formula]) -> Self {
        let mut material_to_slices: BTreeMap<Id, Vec<Id>> = BTreeMap::new();
        for slice in slices {
            push_unique(
                material_to_slices
                    .entry(slice.material_id.clone())
                    .or_default(),
                &slice.node.id,
            );
        }

        let mut slice_to_formulas: BTreeMap<Id, Vec<Id>> = BTreeMap::new();
        for formula in formulas {
            for component in &formula.components {
                push_unique(
                    slice_to_formulas
                        .entry(component.slice_id.clone())
                        .or_default(),
                    &formula.node.id,
                );
            }
        }

        Self {
            material_to_slices,
            slice_to_formulas,
        }
    }
}

fn push_unique(ids: &mut Vec<Id>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BatchStamp, FormulaComponent, FormulaUsage, HerbRole, Processing, ProcessingCategory,
        Weight, WeightUnit,
    };
    use chrono::DateTime;

    fn stamp() -> BatchStamp {
        BatchStamp::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap(), "1.0.0")
    }

    fn slice(id: &str, material_id: &str) -> Slice {
        Slice {
            node: stamp().node(id),
            material_id: material_id.to_string(),
            processing: Processing {
                method: "净制".to_string(),
                category: ProcessingCategory::Cleaning,
                note: None,
            },
            qc: Vec::new(),
            storage: None,
        }
    }

    fn formula(id: &str, slice_ids: &[&str]) -> Formula {
        Formula {
            node: stamp().node(id),
            name: "当归补血汤".to_string(),
            pinyin: "danggui buxue tang".to_string(),
            source: "内外伤辨惑论".to_string(),
            category: "补益剂".to_string(),
            components: slice_ids
                .iter()
                .map(|slice_id| FormulaComponent {
                    slice_id: slice_id.to_string(),
                    weight: Weight {
                        value: 10.0,
                        unit: WeightUnit::Gram,
                    },
                    role: HerbRole::Monarch,
                    function: None,
                })
                .collect(),
            functions: Vec::new(),
            indications: Vec::new(),
            usage: FormulaUsage {
                preparation_method: "水煎服".to_string(),
                dosage_form: "汤剂".to_string(),
                administration: "日一剂".to_string(),
                course: None,
            },
            explanation: None,
            modern_applications: None,
        }
    }

    #[test]
    fn test_build_groups_slices_by_material() {
        let slices = vec![
            slice("slice_1", "huangqi"),
            slice("slice_2", "danggui"),
            slice("slice_3", "huangqi"),
        ];
        let index = RelationIndex::build(&slices, &[]);

        assert_eq!(index.slices_for_material("huangqi"), ["slice_1", "slice_3"]);
        assert_eq!(index.slices_for_material("danggui"), ["slice_2"]);
        assert!(index.slices_for_material("renshen").is_empty());
        assert!(index.slice_to_formulas.is_empty());
    }

    #[test]
    fn test_build_links_formulas_without_duplicates() {
        let slices = vec![slice("slice_1", "huangqi"), slice("slice_2", "danggui")];
        let formulas = vec![
            formula("formula_1", &["slice_1", "slice_2", "slice_1"]),
            formula("formula_2", &["slice_1"]),
        ];
        let index = RelationIndex::build(&slices, &formulas);

        assert_eq!(index.formulas_for_slice("slice_1"), ["formula_1", "formula_2"]);
        assert_eq!(index.formulas_for_slice("slice_2"), ["formula_1"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let slices = vec![slice("slice_1", "huangqi"), slice("slice_2", "huangqi")];
        let formulas = vec![formula("formula_1", &["slice_2"])];

        let first = RelationIndex::build(&slices, &formulas);
        let second = RelationIndex::build(&slices, &formulas);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

//! Entity builders for the normalized schema.
//!
//! `build_material` is pure. Slice and formula builders take the run's
//! allocator explicitly; none of them cascade into one another, the pipeline
//! decides the order.

use crate::logic::normalize::{
    convert_chemical_components, convert_meridians, convert_nature, convert_origins,
    convert_pharmacology, convert_quality_standards, convert_taste, parse_dosage,
};
use crate::logic::sequence::SequenceAllocator;
use crate::model::{
    BatchStamp, Formula, FormulaComponent, FormulaUsage, HerbRole, LegacyHerb, Material,
    MaterialImages, MaterialNames, Processing, ProcessingCategory, Slice, Storage, Weight,
    WeightUnit,
};

/// Method recorded on the synthetic slice of a material with no declared processing
pub const RAW_PROCESSING_METHOD: &str = "净制";

pub const SEED_COMPONENT_WEIGHT_GRAMS: f64 = 10.0;
pub const SEED_FORMULA_PINYIN: &str = "peiweifang";
pub const SEED_FORMULA_CATEGORY: &str = "配伍方";
pub const SEED_FORMULA_SOURCE: &str = "经验方";

const DECOCTION_PREPARATION: &str = "水煎服";
const DECOCTION_FORM: &str = "汤剂";
const DECOCTION_ADMINISTRATION: &str = "日一剂，分两次温服";

/// Build the Material for one legacy record. Total and deterministic for a fixed stamp.
pub fn build_material(herb: &LegacyHerb, stamp: &BatchStamp) -> Material {
    let pharmacopoeia = herb.pharmacopoeia_info.as_ref();

    Material {
        node: stamp.node(herb.id.clone()),
        names: MaterialNames {
            cn: herb.name.clone(),
            pinyin: herb.pinyin.clone(),
            latin: pharmacopoeia
                .and_then(|info| info.latin_name.clone())
                .unwrap_or_default(),
            english: herb.english_name.clone(),
            aliases: pharmacopoeia.and_then(|info| info.aliases.clone()),
        },
        qi: convert_nature(&herb.nature),
        flavor: convert_taste(&herb.taste),
        meridians: convert_meridians(herb.meridians.as_deref()),
        origin: convert_origins(herb.origin.as_deref(), herb.detailed_origins.as_deref()),
        category: herb.category.clone(),
        functions: herb.functions.clone(),
        indications: herb.indications.clone(),
        contraindications: herb.contraindications.clone(),
        dosage: parse_dosage(herb.dosage.as_deref()),
        chemical_components: convert_chemical_components(herb.chemical_components.as_deref()),
        pharmacology: convert_pharmacology(herb.pharmacological_actions.as_deref()),
        quality_standards: convert_quality_standards(herb.quality_control.as_ref()),
        images: MaterialImages {
            primary: herb.primary_image.clone(),
            gallery: herb.images.clone(),
        },
        ext_functions: herb.clinical_application.clone(),
    }
}

/// Build the slices of one material: one per declared processing method, or a
/// single raw (净制) slice when none are declared. Never returns an empty list.
pub fn build_slices(
    herb: &LegacyHerb,
    material: &Material,
    stamp: &BatchStamp,
    ids: &mut SequenceAllocator,
) -> Vec<Slice> {
    let name = &material.names.cn;
    let methods = herb.processing_methods();

    if methods.is_empty() {
        return vec![Slice {
            node: stamp.node(ids.next_id()),
            material_id: material.node.id.clone(),
            processing: Processing {
                method: RAW_PROCESSING_METHOD.to_string(),
                category: ProcessingCategory::Cleaning,
                note: Some(format!("{}生品", name)),
            },
            qc: Vec::new(),
            storage: Some(Storage::default()),
        }];
    }

    methods
        .iter()
        .map(|method| Slice {
            node: stamp.node(ids.next_id()),
            material_id: material.node.id.clone(),
            processing: Processing {
                method: method.clone(),
                category: ProcessingCategory::Roasting,
                note: Some(format!("{}的{}饮片", name, method)),
            },
            qc: Vec::new(),
            storage: Some(Storage::default()),
        })
        .collect()
}

/// Seed a formula from the record's first common combination.
///
/// Returns `None` (and allocates nothing) when the record declares no
/// combination. The single component references `slice`, which the pipeline
/// passes as the last slice built for this record's material.
pub fn build_formula(
    herb: &LegacyHerb,
    slice: &Slice,
    stamp: &BatchStamp,
    ids: &mut SequenceAllocator,
) -> Option<Formula> {
    let combination = herb.first_combination()?;
    let source = combination
        .source
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    let function = combination
        .function
        .clone()
        .filter(|f| !f.trim().is_empty());

    Some(Formula {
        node: stamp.node(ids.next_id()),
        name: source
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}配伍方", herb.name)),
        pinyin: SEED_FORMULA_PINYIN.to_string(),
        source: source.unwrap_or(SEED_FORMULA_SOURCE).to_string(),
        category: SEED_FORMULA_CATEGORY.to_string(),
        components: vec![FormulaComponent {
            slice_id: slice.node.id.clone(),
            weight: Weight {
                value: SEED_COMPONENT_WEIGHT_GRAMS,
                unit: WeightUnit::Gram,
            },
            role: HerbRole::Monarch,
            function: function.clone(),
        }],
        functions: function.into_iter().collect(),
        indications: combination.indications.clone(),
        usage: FormulaUsage {
            preparation_method: DECOCTION_PREPARATION.to_string(),
            dosage_form: DECOCTION_FORM.to_string(),
            administration: DECOCTION_ADMINISTRATION.to_string(),
            course: None,
        },
        explanation: None,
        modern_applications: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Flavor, LegacyCombination, LegacyCompatibilityInfo, LegacyPharmacopoeiaInfo,
        LegacyQualityControl, Qi,
    };
    use chrono::DateTime;

    fn stamp() -> BatchStamp {
        BatchStamp::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap(), "1.0.0")
    }

    fn herb() -> LegacyHerb {
        LegacyHerb {
            id: "huangqi".to_string(),
            name: "黄芪".to_string(),
            pinyin: "huangqi".to_string(),
            nature: "微温".to_string(),
            taste: vec!["甘".to_string()],
            meridians: Some(vec!["肺经".to_string(), "脾经".to_string()]),
            origin: Some(vec!["甘肃".to_string()]),
            category: "补虚药".to_string(),
            functions: vec!["补气升阳".to_string()],
            indications: vec!["气虚乏力".to_string()],
            dosage: Some("9-30g".to_string()),
            primary_image: "/images/huangqi.webp".to_string(),
            images: vec!["/images/huangqi-1.webp".to_string()],
            clinical_application: Some(vec!["慢性肾炎".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_material_maps_fields() {
        let material = build_material(&herb(), &stamp());

        assert_eq!(material.id(), "huangqi");
        assert_eq!(material.names.cn, "黄芪");
        assert_eq!(material.names.latin, "");
        assert_eq!(material.qi, Qi::Warm);
        assert_eq!(material.flavor, vec![Flavor::Sweet]);
        assert_eq!(material.meridians.len(), 2);
        assert_eq!(material.origin[0].province, "甘肃");
        assert_eq!(
            (material.dosage.min, material.dosage.max, material.dosage.common),
            (9, 30, 20)
        );
        assert_eq!(material.images.primary, "/images/huangqi.webp");
        assert_eq!(material.ext_functions, Some(vec!["慢性肾炎".to_string()]));
        assert!(material.quality_standards.is_none());
        assert!(material.chemical_components.is_empty());
    }

    #[test]
    fn test_build_material_is_deterministic() {
        let first = build_material(&herb(), &stamp());
        let second = build_material(&herb(), &stamp());
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_material_pharmacopoeia_and_quality_control() {
        let mut legacy = herb();
        legacy.pharmacopoeia_info = Some(LegacyPharmacopoeiaInfo {
            latin_name: Some("Astragali Radix".to_string()),
            aliases: Some(vec!["绵芪".to_string()]),
            ..Default::default()
        });
        legacy.quality_control = Some(LegacyQualityControl {
            quality_indicators: Some(Vec::new()),
            ..Default::default()
        });

        let material = build_material(&legacy, &stamp());
        assert_eq!(material.names.latin, "Astragali Radix");
        assert_eq!(material.names.aliases, Some(vec!["绵芪".to_string()]));
        assert_eq!(material.quality_standards, Some(Vec::new()));
        assert!(!material.has_quality_standards());
    }

    #[test]
    fn test_build_material_is_total_on_empty_record() {
        let material = build_material(&LegacyHerb::default(), &stamp());
        assert_eq!(material.qi, Qi::Neutral);
        assert!(material.flavor.is_empty());
        assert!(material.meridians.is_empty());
        assert!(material.origin.is_empty());
        assert_eq!(material.dosage.common, 10);
    }

    #[test]
    fn test_build_slices_default_raw_slice() {
        let legacy = herb();
        let material = build_material(&legacy, &stamp());
        let mut ids = SequenceAllocator::new("slice");

        let slices = build_slices(&legacy, &material, &stamp(), &mut ids);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].id(), "slice_1");
        assert_eq!(slices[0].material_id, "huangqi");
        assert_eq!(slices[0].processing.method, "净制");
        assert_eq!(slices[0].processing.category, ProcessingCategory::Cleaning);
        assert_eq!(slices[0].processing.note.as_deref(), Some("黄芪生品"));
        assert!(slices[0].qc.is_empty());
        assert_eq!(slices[0].storage, Some(Storage::default()));
    }

    #[test]
    fn test_build_slices_one_per_method() {
        let mut legacy = herb();
        legacy.processing = Some(vec!["蜜炙".to_string(), "酒炙".to_string()]);
        let material = build_material(&legacy, &stamp());
        let mut ids = SequenceAllocator::starting_at("slice", 7);

        let slices = build_slices(&legacy, &material, &stamp(), &mut ids);
        let ids: Vec<&str> = slices.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["slice_7", "slice_8"]);
        assert_eq!(slices[1].processing.method, "酒炙");
        assert_eq!(slices[1].processing.category, ProcessingCategory::Roasting);
        assert_eq!(slices[1].processing.note.as_deref(), Some("黄芪的酒炙饮片"));
    }

    #[test]
    fn test_build_formula_only_with_combinations() {
        let legacy = herb();
        let material = build_material(&legacy, &stamp());
        let mut slice_ids = SequenceAllocator::new("slice");
        let slices = build_slices(&legacy, &material, &stamp(), &mut slice_ids);
        let mut formula_ids = SequenceAllocator::new("formula");

        assert!(build_formula(&legacy, &slices[0], &stamp(), &mut formula_ids).is_none());
        assert_eq!(formula_ids.issued(), 0);

        let mut legacy = legacy;
        legacy.compatibility_info = Some(LegacyCompatibilityInfo {
            common_combinations: Some(Vec::new()),
            ..Default::default()
        });
        assert!(build_formula(&legacy, &slices[0], &stamp(), &mut formula_ids).is_none());
    }

    #[test]
    fn test_build_formula_seeds_from_first_combination() {
        let mut legacy = herb();
        legacy.compatibility_info = Some(LegacyCompatibilityInfo {
            common_combinations: Some(vec![
                LegacyCombination {
                    herbs: vec!["黄芪".to_string(), "当归".to_string()],
                    function: Some("补气生血".to_string()),
                    indications: vec!["血虚发热".to_string()],
                    source: Some("当归补血汤".to_string()),
                    ..Default::default()
                },
                LegacyCombination {
                    source: Some("玉屏风散".to_string()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        });
        let material = build_material(&legacy, &stamp());
        let mut slice_ids = SequenceAllocator::new("slice");
        let slices = build_slices(&legacy, &material, &stamp(), &mut slice_ids);
        let mut formula_ids = SequenceAllocator::new("formula");

        let formula = build_formula(&legacy, &slices[0], &stamp(), &mut formula_ids).unwrap();
        assert_eq!(formula.id(), "formula_1");
        assert_eq!(formula.name, "当归补血汤");
        assert_eq!(formula.source, "当归补血汤");
        assert_eq!(formula.pinyin, "peiweifang");
        assert_eq!(formula.components.len(), 1);
        assert_eq!(formula.components[0].slice_id, "slice_1");
        assert_eq!(formula.components[0].role, HerbRole::Monarch);
        assert_eq!(formula.components[0].function.as_deref(), Some("补气生血"));
        assert_eq!(formula.functions, vec!["补气生血".to_string()]);
        assert_eq!(formula.indications, vec!["血虚发热".to_string()]);
        assert_eq!(formula.total_weight_grams(), 10.0);
    }

    #[test]
    fn test_build_formula_without_source_uses_fallback_names() {
        let mut legacy = herb();
        legacy.compatibility_info = Some(LegacyCompatibilityInfo {
            common_combinations: Some(vec![LegacyCombination::default()]),
            ..Default::default()
        });
        let material = build_material(&legacy, &stamp());
        let mut slice_ids = SequenceAllocator::new("slice");
        let slices = build_slices(&legacy, &material, &stamp(), &mut slice_ids);
        let mut formula_ids = SequenceAllocator::new("formula");

        let formula = build_formula(&legacy, &slices[0], &stamp(), &mut formula_ids).unwrap();
        assert_eq!(formula.name, "黄芪配伍方");
        assert_eq!(formula.source, "经验方");
        assert!(formula.functions.is_empty());
    }
}

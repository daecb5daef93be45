//! Field normalizers: legacy free-form vocabulary to the closed domain vocabulary.
//!
//! Every function here is total. Input that cannot be mapped degrades to a
//! documented default (or is dropped, for list-valued fields) and is logged at
//! debug level only.

use itertools::Itertools;
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::model::{
    AuthenticRegion, ChemicalComponent, ComponentImportance, ContentRange, Dosage,
    EvidenceLevel, Flavor, LegacyChemicalComponent, LegacyPharmacologicalAction,
    LegacyProvinceInfo, LegacyQualityControl, Meridian, PharmacologicalAction, Qi,
    QualityStandard, RegionQuality,
};

/// Modifier meaning "slightly", prefixed to tastes and natures
const INTENSIFIER: &str = "微";
const MERIDIAN_SUFFIX: &str = "经";

pub const DEFAULT_DOSAGE_MIN: u32 = 3;
pub const DEFAULT_DOSAGE_MAX: u32 = 15;
pub const DEFAULT_DOSAGE_COMMON: u32 = 10;

pub const DEFAULT_PHARMACOPOEIA: &str = "中国药典2020版";
const UNKNOWN_COMPONENT_NAME: &str = "未知成分";
const OTHER_COMPONENT_CATEGORY: &str = "其他";

static DOSAGE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)-(\d+)g").expect("dosage pattern is a valid regex")
});

/// JS-style `a || b` for optional text: blank counts as absent
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Map a legacy nature string onto the five thermal natures.
///
/// Intensified variants collapse onto their base category; anything unknown
/// becomes neutral.
pub fn convert_nature(nature: &str) -> Qi {
    match nature.trim() {
        "寒" | "微寒" | "大寒" | "cold" => Qi::Cold,
        "凉" | "微凉" | "cool" => Qi::Cool,
        "平" | "neutral" => Qi::Neutral,
        "温" | "微温" | "warm" => Qi::Warm,
        "热" | "微热" | "大热" | "hot" => Qi::Hot,
        other => {
            debug!("Unmapped nature '{}', defaulting to {}", other, Qi::Neutral);
            Qi::Neutral
        }
    }
}

fn flavor_from_label(label: &str) -> Option<Flavor> {
    if let Some(flavor) = Flavor::ALL.into_iter().find(|f| f.label() == label) {
        return Some(flavor);
    }
    match label {
        "sour" => Some(Flavor::Sour),
        "bitter" => Some(Flavor::Bitter),
        "sweet" => Some(Flavor::Sweet),
        "pungent" | "spicy" => Some(Flavor::Pungent),
        "salty" => Some(Flavor::Salty),
        "bland" => Some(Flavor::Bland),
        "astringent" => Some(Flavor::Astringent),
        _ => None,
    }
}

/// Map legacy tastes onto the closed taste enumeration.
///
/// The 微 prefix is stripped, unknown tokens are dropped (never defaulted) and
/// duplicates are removed keeping the first occurrence. The result may be empty.
pub fn convert_taste(tastes: &[String]) -> Vec<Flavor> {
    tastes
        .iter()
        .filter_map(|taste| {
            let taste = taste.trim();
            let base = taste.strip_prefix(INTENSIFIER).unwrap_or(taste);
            let flavor = flavor_from_label(base);
            if flavor.is_none() {
                debug!("Dropping unknown taste '{}'", taste);
            }
            flavor
        })
        .unique()
        .collect()
}

fn meridian_from_label(label: &str) -> Option<Meridian> {
    let bare = label.strip_suffix(MERIDIAN_SUFFIX).unwrap_or(label);
    if let Some(meridian) = Meridian::ALL.into_iter().find(|m| m.label() == bare) {
        return Some(meridian);
    }
    match label {
        "liver" => Some(Meridian::Liver),
        "heart" => Some(Meridian::Heart),
        "spleen" => Some(Meridian::Spleen),
        "lung" => Some(Meridian::Lung),
        "kidney" => Some(Meridian::Kidney),
        "pericardium" => Some(Meridian::Pericardium),
        "gallbladder" => Some(Meridian::Gallbladder),
        "smallIntestine" => Some(Meridian::SmallIntestine),
        "stomach" => Some(Meridian::Stomach),
        "largeIntestine" => Some(Meridian::LargeIntestine),
        "bladder" => Some(Meridian::Bladder),
        "tripleWarmer" => Some(Meridian::TripleBurner),
        _ => None,
    }
}

/// Map legacy meridian names (`肝经`, `肝`, `liver`) onto the twelve meridians.
///
/// Unmatched entries are dropped. Absent input yields an empty list; no default
/// meridians are invented.
pub fn convert_meridians(meridians: Option<&[String]>) -> Vec<Meridian> {
    let Some(meridians) = meridians else {
        return Vec::new();
    };
    meridians
        .iter()
        .filter_map(|m| {
            let meridian = meridian_from_label(m.trim());
            if meridian.is_none() {
                debug!("Dropping unknown meridian '{}'", m);
            }
            meridian
        })
        .unique()
        .collect()
}

/// Parse a legacy dosage string such as `3-15g`.
///
/// On success `common` is the midpoint rounded half up. Anything else yields
/// 3/15/10. The original text is always kept as the note.
pub fn parse_dosage(dosage: Option<&str>) -> Dosage {
    let fallback = Dosage {
        min: DEFAULT_DOSAGE_MIN,
        max: DEFAULT_DOSAGE_MAX,
        common: DEFAULT_DOSAGE_COMMON,
        notes: dosage.map(str::to_string),
    };

    let Some(text) = dosage else {
        return fallback;
    };
    let Some(captures) = DOSAGE_RANGE.captures(text) else {
        debug!("Dosage '{}' has no min-max pattern, using defaults", text);
        return fallback;
    };

    match (captures[1].parse::<u32>(), captures[2].parse::<u32>()) {
        (Ok(min), Ok(max)) => Dosage {
            min,
            max,
            common: ((u64::from(min) + u64::from(max) + 1) / 2) as u32,
            notes: Some(text.to_string()),
        },
        _ => fallback,
    }
}

fn region_quality(label: Option<&str>) -> RegionQuality {
    match label.map(str::trim) {
        Some("excellent") => RegionQuality::Excellent,
        Some("good") | None => RegionQuality::Good,
        Some("moderate") => RegionQuality::Moderate,
        Some(other) => {
            debug!("Unknown region quality '{}', using good", other);
            RegionQuality::Good
        }
    }
}

/// Build one authentic region per declared origin.
///
/// Quality and notes come from the `detailedOrigins` entry whose province
/// equals the origin exactly; unmatched origins default to good quality.
pub fn convert_origins(
    origins: Option<&[String]>,
    detailed: Option<&[LegacyProvinceInfo]>,
) -> Vec<AuthenticRegion> {
    let detailed = detailed.unwrap_or_default();
    origins
        .unwrap_or_default()
        .iter()
        .map(|origin| {
            let info = detailed.iter().find(|d| d.province == *origin);
            AuthenticRegion {
                region: origin.clone(),
                province: origin.clone(),
                quality: region_quality(info.and_then(|d| d.quality.as_deref())),
                notes: info.and_then(|d| d.notes.clone()),
            }
        })
        .collect()
}

/// Number in a JSON object, with zero treated as absent
fn nonzero_number(object: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| *n != 0.0)
}

fn content_range(content: Option<&Value>) -> ContentRange {
    match content {
        Some(Value::Object(object)) => ContentRange {
            min: nonzero_number(object, "min").unwrap_or(0.0),
            max: nonzero_number(object, "max").unwrap_or(100.0),
            typical: object.get("typical").and_then(Value::as_f64),
        },
        _ => ContentRange {
            min: 0.0,
            max: 100.0,
            typical: None,
        },
    }
}

fn component_importance(label: Option<&str>) -> ComponentImportance {
    match label {
        Some("primary") => ComponentImportance::Primary,
        Some("trace") => ComponentImportance::Trace,
        _ => ComponentImportance::Secondary,
    }
}

pub fn convert_chemical_components(
    components: Option<&[LegacyChemicalComponent]>,
) -> Vec<ChemicalComponent> {
    components
        .unwrap_or_default()
        .iter()
        .map(|component| ChemicalComponent {
            name: non_blank(component.name.as_deref())
                .unwrap_or(UNKNOWN_COMPONENT_NAME)
                .to_string(),
            category: non_blank(component.category.as_deref())
                .unwrap_or(OTHER_COMPONENT_CATEGORY)
                .to_string(),
            content: content_range(component.content.as_ref()),
            importance: component_importance(component.importance.as_deref()),
            bioactivity: component.function.clone(),
        })
        .collect()
}

fn evidence_level(label: Option<&str>) -> EvidenceLevel {
    match label {
        Some("strong") => EvidenceLevel::Strong,
        Some("preliminary") => EvidenceLevel::Preliminary,
        _ => EvidenceLevel::Moderate,
    }
}

/// Convert pharmacology entries. Structured entries without action text are dropped.
pub fn convert_pharmacology(
    actions: Option<&[LegacyPharmacologicalAction]>,
) -> Vec<PharmacologicalAction> {
    actions
        .unwrap_or_default()
        .iter()
        .filter_map(|action| match action {
            LegacyPharmacologicalAction::Text(text) => {
                non_blank(Some(text.as_str())).map(|text| PharmacologicalAction {
                    action: text.to_string(),
                    mechanism: None,
                    target_organs: None,
                    evidence: EvidenceLevel::default(),
                    references: None,
                })
            }
            LegacyPharmacologicalAction::Detailed(detail) => {
                let Some(text) = non_blank(detail.action.as_deref()) else {
                    debug!("Dropping pharmacology entry without action text");
                    return None;
                };
                Some(PharmacologicalAction {
                    action: text.to_string(),
                    mechanism: detail.mechanism.clone(),
                    target_organs: detail.target_organs.clone(),
                    evidence: evidence_level(detail.evidence.as_deref()),
                    references: detail.studies.clone().or_else(|| detail.references.clone()),
                })
            }
        })
        .collect()
}

/// Quality standards exist only when the legacy record has a quality-control
/// block with indicators; otherwise the result is `None`, not an empty list.
pub fn convert_quality_standards(
    quality_control: Option<&LegacyQualityControl>,
) -> Option<Vec<QualityStandard>> {
    quality_control
        .and_then(|qc| qc.quality_indicators.as_ref())
        .map(|indicators| {
            indicators
                .iter()
                .map(|indicator| QualityStandard {
                    parameter: indicator.parameter.clone(),
                    specification: indicator.specification.clone(),
                    method: indicator.method.clone(),
                    pharmacopoeia: Some(DEFAULT_PHARMACOPOEIA.to_string()),
                })
                .collect()
        })
}

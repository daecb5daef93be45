use serde::{Deserialize, Serialize};

use crate::model::{
    BaseNode, ComponentImportance, EvidenceLevel, Flavor, Meridian, Qi, RegionQuality,
};

/// Raw medicinal substance (药材). One per legacy herb record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(flatten)]
    pub node: BaseNode,
    pub names: MaterialNames,
    pub qi: Qi,
    pub flavor: Vec<Flavor>,
    pub meridians: Vec<Meridian>,
    pub origin: Vec<AuthenticRegion>,
    pub category: String,
    pub functions: Vec<String>,
    pub indications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<Vec<String>>,
    pub dosage: Dosage,
    #[serde(default)]
    pub chemical_components: Vec<ChemicalComponent>,
    #[serde(default)]
    pub pharmacology: Vec<PharmacologicalAction>,
    /// Present only when the legacy record carried a quality-control block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_standards: Option<Vec<QualityStandard>>,
    pub images: MaterialImages,
    /// Off-label functions copied verbatim from the legacy clinical application list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext_functions: Option<Vec<String>>,
}

impl Material {
    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// True when at least one production region is rated excellent (道地药材)
    pub fn is_authentic(&self) -> bool {
        self.origin
            .iter()
            .any(|region| region.quality == RegionQuality::Excellent)
    }

    /// Absent and empty standards both mean "no standards"
    pub fn has_quality_standards(&self) -> bool {
        self.quality_standards
            .as_ref()
            .is_some_and(|standards| !standards.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialNames {
    pub cn: String,
    pub pinyin: String,
    /// Empty until a Latin binomial is supplied
    pub latin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

/// Dosage range in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dosage {
    pub min: u32,
    pub max: u32,
    pub common: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Authentic production region (道地产区), embedded in a Material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticRegion {
    pub region: String,
    pub province: String,
    pub quality: RegionQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalComponent {
    pub name: String,
    pub category: String,
    pub content: ContentRange,
    pub importance: ComponentImportance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioactivity: Option<String>,
}

/// Content range in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRange {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacologicalAction {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_organs: Option<Vec<String>>,
    pub evidence: EvidenceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityStandard {
    pub parameter: String,
    pub specification: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacopoeia: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialImages {
    pub primary: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

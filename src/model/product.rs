//! Downstream manufactured products: dispensing granules and patent medicines.
//!
//! The migration emits these collections empty; the types exist so the
//! persisted schema is complete and consumers can author records by hand.

use serde::{Deserialize, Serialize};

use crate::model::{BaseNode, Id};

/// Single-herb dispensing granule (配方颗粒) made from one Slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleIngredient {
    #[serde(flatten)]
    pub node: BaseNode,
    pub slice_id: Id,
    pub extraction: Extraction,
    pub concentration: Concentration,
    pub drying: Drying,
    pub granule: GranuleSpec,
    pub quality: GranuleQuality,
    pub equivalence: Equivalence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solvent {
    #[serde(rename = "水")]
    Water,
    #[serde(rename = "乙醇")]
    Ethanol,
    #[serde(rename = "混合")]
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub solvent: Solvent,
    /// Solvent concentration in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<f64>,
    /// Material to liquid ratio
    pub ratio: f64,
    /// °C
    pub temperature: f64,
    /// Minutes
    pub duration: f64,
    pub times: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    pub method: String,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drying {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub moisture: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleSpec {
    pub extract_ratio: f64,
    pub particle_size: String,
    pub solubility: String,
    pub appearance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleQuality {
    pub active_components: Vec<ActiveComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heavy_metals: Option<Vec<ContaminantLimit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microbial: Option<Vec<ContaminantLimit>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveComponent {
    pub name: String,
    /// mg/g
    pub content: f64,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContaminantLimit {
    pub item: String,
    pub limit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalence {
    /// Grams of slice one dose of granule stands for
    pub raw_herb_amount: f64,
    pub daily_dose: String,
}

/// Granule prescription (配方颗粒处方) issued by a hospital
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleFormula {
    #[serde(flatten)]
    pub node: BaseNode,
    pub prescription_no: String,
    pub hospital: String,
    pub department: String,
    pub doctor: String,
    pub ingredients: Vec<GranuleDose>,
    pub usage: GranuleUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<CompatibilityAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranuleDose {
    pub ingredient_id: Id,
    /// Grams
    pub dosage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranuleUsage {
    pub frequency: String,
    pub timing: String,
    pub course: String,
    pub preparation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityAnalysis {
    pub synergies: Vec<String>,
    pub cautions: Vec<String>,
}

/// Approved patent medicine (中成药)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentMedicine {
    #[serde(flatten)]
    pub node: BaseNode,
    pub name: MedicineName,
    pub approval: Approval,
    pub manufacturer: Manufacturer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_ref: Option<Id>,
    pub composition: Composition,
    pub formulation: Formulation,
    pub clinical: ClinicalInfo,
    pub quality_standards: Vec<MedicineStandard>,
    pub packaging: Packaging,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineName {
    pub cn: String,
    pub pinyin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalType {
    #[serde(rename = "国药准字")]
    Domestic,
    #[serde(rename = "进口药品")]
    Imported,
    #[serde(rename = "其他")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub number: String,
    #[serde(rename = "type")]
    pub approval_type: ApprovalType,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub name: String,
    pub license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmp_certificate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub herbs: Vec<CompositionHerb>,
    pub excipients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionHerb {
    pub material_id: Id,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formulation {
    pub dosage_form: String,
    pub specification: String,
    pub appearance: String,
    pub identification: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInfo {
    pub functions: Vec<String>,
    pub usage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adverse_reactions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineStandard {
    pub item: String,
    pub specification: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packaging {
    pub materials: Vec<String>,
    pub sizes: Vec<String>,
    pub storage: String,
    pub shelf_life: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reimbursable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reimbursement_category: Option<String>,
}

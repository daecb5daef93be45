use serde::{Deserialize, Serialize};

use crate::model::{BaseNode, HerbRole, Id};

/// Named multi-ingredient prescription (方剂)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    #[serde(flatten)]
    pub node: BaseNode,
    pub name: String,
    pub pinyin: String,
    pub source: String,
    pub category: String,
    pub components: Vec<FormulaComponent>,
    pub functions: Vec<String>,
    pub indications: Vec<String>,
    pub usage: FormulaUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<FormulaExplanation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modern_applications: Option<ModernApplications>,
}

impl Formula {
    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// Total weight of all components in grams
    pub fn total_weight_grams(&self) -> f64 {
        self.components
            .iter()
            .map(|component| component.weight.grams())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaComponent {
    pub slice_id: Id,
    pub weight: Weight,
    pub role: HerbRole,
    /// Function of this slice within the formula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn grams(&self) -> f64 {
        match self.unit {
            WeightUnit::Gram => self.value,
            WeightUnit::Kilogram => self.value * 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaUsage {
    pub preparation_method: String,
    pub dosage_form: String,
    pub administration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

/// Formula rationale (方解)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaExplanation {
    pub principle: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernApplications {
    pub diseases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_trials: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adverse_reactions: Option<Vec<String>>,
}

//! Legacy flat "Herb" records, the input generation of the catalog data.
//!
//! Deserialization is lenient: a missing or `null` field falls back to an
//! empty value and one sparse record never fails the batch.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyHerb {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub english_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub pinyin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub taste: Vec<String>,
    pub meridians: Option<Vec<String>>,
    pub origin: Option<Vec<String>>,
    pub detailed_origins: Option<Vec<LegacyProvinceInfo>>,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub functions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub indications: Vec<String>,
    pub contraindications: Option<Vec<String>>,
    pub dosage: Option<String>,
    pub processing: Option<Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_image: String,
    pub clinical_application: Option<Vec<String>>,
    pub pharmacopoeia_info: Option<LegacyPharmacopoeiaInfo>,
    pub chemical_components: Option<Vec<LegacyChemicalComponent>>,
    pub pharmacological_actions: Option<Vec<LegacyPharmacologicalAction>>,
    pub quality_control: Option<LegacyQualityControl>,
    pub compatibility_info: Option<LegacyCompatibilityInfo>,
}

impl LegacyHerb {
    /// Declared processing methods in source order
    pub fn processing_methods(&self) -> &[String] {
        self.processing.as_deref().unwrap_or_default()
    }

    /// First declared common combination, if any
    pub fn first_combination(&self) -> Option<&LegacyCombination> {
        self.compatibility_info
            .as_ref()
            .and_then(|info| info.common_combinations.as_ref())
            .and_then(|combinations| combinations.first())
    }
}

/// Per-province detail attached to a legacy origin list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyProvinceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub province: String,
    pub quality: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyPharmacopoeiaInfo {
    pub code: Option<String>,
    pub latin_name: Option<String>,
    pub aliases: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyChemicalComponent {
    pub name: Option<String>,
    pub category: Option<String>,
    /// Either a `{min, max, typical}` object or free text such as "0.5%-2%"
    pub content: Option<serde_json::Value>,
    pub function: Option<String>,
    pub importance: Option<String>,
}

/// Legacy pharmacology entries are either bare strings or structured objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyPharmacologicalAction {
    Text(String),
    Detailed(LegacyActionDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyActionDetail {
    pub action: Option<String>,
    pub mechanism: Option<String>,
    pub target_organs: Option<Vec<String>>,
    pub evidence: Option<String>,
    pub studies: Option<Vec<String>>,
    pub references: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyQualityControl {
    pub quality_indicators: Option<Vec<LegacyQualityIndicator>>,
    pub storage_conditions: Option<String>,
    pub shelf_life: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyQualityIndicator {
    #[serde(deserialize_with = "null_as_default")]
    pub parameter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub specification: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyCompatibilityInfo {
    pub common_combinations: Option<Vec<LegacyCombination>>,
    pub incompatible_herbs: Option<Vec<String>>,
}

/// One classical pairing the legacy record cites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyCombination {
    #[serde(deserialize_with = "null_as_default")]
    pub herbs: Vec<String>,
    pub ratio: Option<String>,
    pub function: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub indications: Vec<String>,
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_deserializes_with_defaults() {
        let json = r#"{"id": "h1", "name": "黄芪", "taste": null, "images": null}"#;
        let herb: LegacyHerb = serde_json::from_str(json).unwrap();

        assert_eq!(herb.id, "h1");
        assert_eq!(herb.pinyin, "");
        assert!(herb.taste.is_empty());
        assert!(herb.images.is_empty());
        assert!(herb.processing.is_none());
        assert!(herb.first_combination().is_none());
    }

    #[test]
    fn test_pharmacology_accepts_text_and_objects() {
        let json = r#"["抗炎", {"action": "免疫调节", "studies": ["s1"]}]"#;
        let actions: Vec<LegacyPharmacologicalAction> = serde_json::from_str(json).unwrap();

        assert_eq!(actions[0], LegacyPharmacologicalAction::Text("抗炎".to_string()));
        match &actions[1] {
            LegacyPharmacologicalAction::Detailed(detail) => {
                assert_eq!(detail.action.as_deref(), Some("免疫调节"));
                assert_eq!(detail.studies.as_ref().map(|s| s.len()), Some(1));
            }
            other => panic!("expected detailed action, got {:?}", other),
        }
    }

    #[test]
    fn test_processing_methods_default_to_empty() {
        let herb = LegacyHerb::default();
        assert!(herb.processing_methods().is_empty());

        let herb = LegacyHerb {
            processing: Some(vec!["酒炙".to_string(), "蜜炙".to_string()]),
            ..Default::default()
        };
        assert_eq!(herb.processing_methods(), ["酒炙", "蜜炙"]);
    }
}

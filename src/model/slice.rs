use serde::{Deserialize, Serialize};

use crate::model::{BaseNode, Id};

/// Processed form (饮片) of exactly one Material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    #[serde(flatten)]
    pub node: BaseNode,
    pub material_id: Id,
    pub processing: Processing,
    pub qc: Vec<QcIndicator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,
}

impl Slice {
    pub fn id(&self) -> &str {
        &self.node.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processing {
    pub method: String,
    pub category: ProcessingCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Processing category (炮制类别)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingCategory {
    /// Cleaning only; the raw slice
    #[serde(rename = "净制")]
    Cleaning,
    #[serde(rename = "切制")]
    Cutting,
    /// Heat or excipient processing
    #[serde(rename = "炮炙")]
    Roasting,
    #[serde(rename = "其他")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcIndicator {
    pub item: String,
    pub standard: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub method: String,
    pub qualified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub temperature: String,
    pub humidity: String,
    pub light_condition: String,
    /// Months
    pub shelf_life: u32,
    pub container: String,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            temperature: "常温".to_string(),
            humidity: "≤60%".to_string(),
            light_condition: "避光".to_string(),
            shelf_life: 24,
            container: "密闭容器".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults_serialize_in_camel_case() {
        let json = serde_json::to_value(Storage::default()).unwrap();
        assert_eq!(json["temperature"], "常温");
        assert_eq!(json["lightCondition"], "避光");
        assert_eq!(json["shelfLife"], 24);
        assert_eq!(
            serde_json::to_string(&ProcessingCategory::Cleaning).unwrap(),
            "\"净制\""
        );
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Id;

/// `relations.json`: derived cross-entity index.
///
/// Keys are sorted so the file is stable; each value list keeps first-insertion
/// order and holds no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationIndex {
    pub material_to_slices: BTreeMap<Id, Vec<Id>>,
    pub slice_to_formulas: BTreeMap<Id, Vec<Id>>,
}

impl RelationIndex {
    pub fn slices_for_material(&self, material_id: &str) -> &[Id] {
        self.material_to_slices
            .get(material_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn formulas_for_slice(&self, slice_id: &str) -> &[Id] {
        self.slice_to_formulas
            .get(slice_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

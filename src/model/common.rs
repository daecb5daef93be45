use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Id = String;

/// Schema version stamped on every entity when none is configured
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope shared by every top-level entity in the normalized schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseNode {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: String,
}

/// Timestamp and schema version applied to one migration batch.
///
/// Passed to the builders in place of the wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStamp {
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl BatchStamp {
    pub fn new(timestamp: DateTime<Utc>, version: impl Into<String>) -> Self {
        Self {
            timestamp,
            version: version.into(),
        }
    }

    /// Stamp taken from the current time with the default schema version
    pub fn now() -> Self {
        Self::new(Utc::now(), DEFAULT_SCHEMA_VERSION)
    }

    pub fn node(&self, id: impl Into<Id>) -> BaseNode {
        BaseNode {
            id: id.into(),
            created_at: self.timestamp,
            updated_at: self.timestamp,
            version: self.version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_uses_batch_timestamp_for_both_fields() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let stamp = BatchStamp::new(ts, "2.0.0");

        let node = stamp.node("mat_1");
        assert_eq!(node.id, "mat_1");
        assert_eq!(node.created_at, ts);
        assert_eq!(node.updated_at, ts);
        assert_eq!(node.version, "2.0.0");

        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}

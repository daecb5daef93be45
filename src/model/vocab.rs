//! Closed domain vocabularies of the normalized schema.
//!
//! Every enumeration serializes with its Chinese label, which is what the
//! catalog front end reads.

use serde::{Deserialize, Serialize};

/// Thermal nature (四气)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qi {
    #[serde(rename = "寒")]
    Cold,
    #[serde(rename = "凉")]
    Cool,
    #[default]
    #[serde(rename = "平")]
    Neutral,
    #[serde(rename = "温")]
    Warm,
    #[serde(rename = "热")]
    Hot,
}

impl Qi {
    pub fn label(&self) -> &'static str {
        match self {
            Qi::Cold => "寒",
            Qi::Cool => "凉",
            Qi::Neutral => "平",
            Qi::Warm => "温",
            Qi::Hot => "热",
        }
    }
}

impl std::fmt::Display for Qi {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Taste (五味)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    #[serde(rename = "酸")]
    Sour,
    #[serde(rename = "苦")]
    Bitter,
    #[serde(rename = "甘")]
    Sweet,
    #[serde(rename = "辛")]
    Pungent,
    #[serde(rename = "咸")]
    Salty,
    #[serde(rename = "淡")]
    Bland,
    #[serde(rename = "涩")]
    Astringent,
}

impl Flavor {
    pub const ALL: [Flavor; 7] = [
        Flavor::Sour,
        Flavor::Bitter,
        Flavor::Sweet,
        Flavor::Pungent,
        Flavor::Salty,
        Flavor::Bland,
        Flavor::Astringent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Flavor::Sour => "酸",
            Flavor::Bitter => "苦",
            Flavor::Sweet => "甘",
            Flavor::Pungent => "辛",
            Flavor::Salty => "咸",
            Flavor::Bland => "淡",
            Flavor::Astringent => "涩",
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Organ-system affinity (归经)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridian {
    #[serde(rename = "肝")]
    Liver,
    #[serde(rename = "心")]
    Heart,
    #[serde(rename = "脾")]
    Spleen,
    #[serde(rename = "肺")]
    Lung,
    #[serde(rename = "肾")]
    Kidney,
    #[serde(rename = "心包")]
    Pericardium,
    #[serde(rename = "胆")]
    Gallbladder,
    #[serde(rename = "小肠")]
    SmallIntestine,
    #[serde(rename = "胃")]
    Stomach,
    #[serde(rename = "大肠")]
    LargeIntestine,
    #[serde(rename = "膀胱")]
    Bladder,
    #[serde(rename = "三焦")]
    TripleBurner,
}

impl Meridian {
    pub const ALL: [Meridian; 12] = [
        Meridian::Liver,
        Meridian::Heart,
        Meridian::Spleen,
        Meridian::Lung,
        Meridian::Kidney,
        Meridian::Pericardium,
        Meridian::Gallbladder,
        Meridian::SmallIntestine,
        Meridian::Stomach,
        Meridian::LargeIntestine,
        Meridian::Bladder,
        Meridian::TripleBurner,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Meridian::Liver => "肝",
            Meridian::Heart => "心",
            Meridian::Spleen => "脾",
            Meridian::Lung => "肺",
            Meridian::Kidney => "肾",
            Meridian::Pericardium => "心包",
            Meridian::Gallbladder => "胆",
            Meridian::SmallIntestine => "小肠",
            Meridian::Stomach => "胃",
            Meridian::LargeIntestine => "大肠",
            Meridian::Bladder => "膀胱",
            Meridian::TripleBurner => "三焦",
        }
    }
}

impl std::fmt::Display for Meridian {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Role of a component inside a formula (君臣佐使)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HerbRole {
    #[serde(rename = "君")]
    Monarch,
    #[serde(rename = "臣")]
    Minister,
    #[serde(rename = "佐")]
    Assistant,
    #[serde(rename = "使")]
    Guide,
}

impl std::fmt::Display for HerbRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HerbRole::Monarch => write!(f, "君"),
            HerbRole::Minister => write!(f, "臣"),
            HerbRole::Assistant => write!(f, "佐"),
            HerbRole::Guide => write!(f, "使"),
        }
    }
}

/// Quality tier of an authentic production region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegionQuality {
    Excellent,
    #[default]
    Good,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentImportance {
    Primary,
    #[default]
    Secondary,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceLevel {
    Strong,
    #[default]
    Moderate,
    Preliminary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_serialize_with_chinese_labels() {
        assert_eq!(serde_json::to_string(&Qi::Warm).unwrap(), "\"温\"");
        assert_eq!(serde_json::to_string(&Flavor::Pungent).unwrap(), "\"辛\"");
        assert_eq!(
            serde_json::to_string(&Meridian::TripleBurner).unwrap(),
            "\"三焦\""
        );
        assert_eq!(serde_json::to_string(&HerbRole::Monarch).unwrap(), "\"君\"");

        for flavor in Flavor::ALL {
            let json = serde_json::to_string(&flavor).unwrap();
            assert_eq!(json, format!("\"{}\"", flavor.label()));
        }
        for meridian in Meridian::ALL {
            let back: Meridian =
                serde_json::from_str(&format!("\"{}\"", meridian.label())).unwrap();
            assert_eq!(back, meridian);
        }
    }

    #[test]
    fn test_tier_defaults() {
        assert_eq!(Qi::default(), Qi::Neutral);
        assert_eq!(RegionQuality::default(), RegionQuality::Good);
        assert_eq!(ComponentImportance::default(), ComponentImportance::Secondary);
        assert_eq!(EvidenceLevel::default(), EvidenceLevel::Moderate);
        assert_eq!(
            serde_json::to_string(&RegionQuality::Excellent).unwrap(),
            "\"excellent\""
        );
    }
}

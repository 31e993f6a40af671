use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-role analysis returned by the generative mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub card: String,
    #[serde(default)]
    pub orientation: String,
    #[serde(default)]
    pub analysis: String,
}

/// Derived text for one reading, cached per (reading, lang, style, mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Reading id; empty for unsaved readings such as the daily card.
    pub id: String,
    pub lang: String,
    pub summary: String,
    pub positions: Vec<String>,
    pub advices: Vec<String>,
    pub llm_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<BTreeMap<String, Section>>,
}

//! Editor tuning knobs.

use crate::style::SerializableColor;
use serde::{Deserialize, Serialize};

/// Settings shared by the editor and the export pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width and height a resize may produce.
    pub min_element_size: i32,
    /// Blank border around an exported snapshot, per side.
    pub export_margin: i32,
    /// Color an export surface is cleared to.
    pub export_background: SerializableColor,
    /// Pick radius for resize handles.
    pub anchor_tolerance: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_element_size: 20,
            export_margin: 10,
            export_background: SerializableColor::white(),
            anchor_tolerance: 4,
        }
    }
}

impl EditorConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

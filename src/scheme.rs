//! Persisted color schemes.
//!
//! A scheme is saved per property, under the lowercase property name:
//!
//! ```json
//! {
//!   "name": "Load",
//!   "type": "Continuous",
//!   "resetDefault": true,
//!   "colormap": { "0": "#0000FF", "100": "#FF0000" },
//!   "continuous": {
//!     "start": { "value": 0, "color": "#0000FF" },
//!     "end": { "value": 100, "color": "#FF0000" }
//!   }
//! }
//! ```
//!
//! Reading and writing the documents belongs to a [`SchemeStore`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::colors::HexColor;
use crate::error::{ColorwizError, Result};
use crate::scale::ScaleKind;

/// The persisted form of a color map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub name: String,
    #[serde(rename = "type")]
    pub scale: ScaleKind,
    #[serde(default = "default_reset_default")]
    pub reset_default: bool,
    /// Colors of the included labels
    #[serde(default)]
    pub colormap: IndexMap<String, HexColor>,
    #[serde(
        default,
        alias = "Continuous",
        skip_serializing_if = "Option::is_none"
    )]
    pub continuous: Option<ContinuousExtremities>,
}

/// Gradient edges of a continuous scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousExtremities {
    pub start: SchemeEdge,
    pub end: SchemeEdge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<SchemeEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchemeEdge {
    pub value: f64,
    pub color: HexColor,
}

fn default_reset_default() -> bool {
    true
}

impl ColorScheme {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Key under which the scheme of `property` is stored
pub fn scheme_key(property: &str) -> String {
    property.to_lowercase()
}

/// Storage for persisted schemes
pub trait SchemeStore {
    /// Load the scheme stored under `key`; a missing or unreadable document is
    /// a [`ColorwizError::SchemeLoad`]
    fn load(&self, key: &str) -> Result<ColorScheme>;

    /// Store `scheme` under `key`, replacing any previous document
    fn save(&mut self, key: &str, scheme: &ColorScheme) -> Result<()>;
}

/// Scheme documents held in memory as JSON text
#[derive(Debug, Clone, Default)]
pub struct MemorySchemeStore {
    documents: HashMap<String, String>,
}

impl MemorySchemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw JSON document, valid or not
    pub fn insert_json(&mut self, key: impl Into<String>, json: impl Into<String>) {
        self.documents.insert(key.into(), json.into());
    }

    pub fn get_json(&self, key: &str) -> Option<&str> {
        self.documents.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SchemeStore for MemorySchemeStore {
    fn load(&self, key: &str) -> Result<ColorScheme> {
        let json = self
            .documents
            .get(key)
            .ok_or_else(|| ColorwizError::SchemeLoad {
                property: key.to_string(),
                message: "no saved scheme".to_string(),
            })?;
        ColorScheme::from_json(json).map_err(|err| ColorwizError::SchemeLoad {
            property: key.to_string(),
            message: err.to_string(),
        })
    }

    fn save(&mut self, key: &str, scheme: &ColorScheme) -> Result<()> {
        let json = scheme.to_json_pretty()?;
        self.documents.insert(key.to_string(), json);
        Ok(())
    }
}

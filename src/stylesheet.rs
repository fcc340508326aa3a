//! Color palettes for the road and its markers
//!
//! Rendering refers to colors by symbolic token (`road`, `start-marker`,
//! `end-marker`) so one layout can be drawn with different themes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::SourceError;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl StylesheetError {
    /// Span-carrying form of a parse failure, for diagnostics
    pub fn source_error(&self) -> Option<SourceError> {
        match self {
            StylesheetError::ParseError(e) => Some(SourceError::from_toml(e)),
            StylesheetError::IoError(_) => None,
        }
    }
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> color; ordered so output is stable
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

const ROAD: &str = "#737373";
const START_MARKER: &str = "#60a5fa";
const END_MARKER: &str = "#2563eb";

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to the default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Markers fall back to the end marker color, everything else to the road color
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.ends_with("marker") {
            return END_MARKER.to_string();
        }
        ROAD.to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        let colors = [("road", ROAD), ("start-marker", START_MARKER), ("end-marker", END_MARKER)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            name: Some("default".to_string()),
            description: None,
            colors,
        }
    }
}

//! `Chart.yaml` parsing.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The version-bearing fields of a Helm chart definition.
///
/// Only the fields the gate cares about are modeled; everything else in the
/// document is ignored. All fields are optional at the parsing layer so
/// that a missing `version` surfaces as a policy failure rather than a
/// deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartDefinition {
    /// Chart API version (`v1` or `v2`).
    #[serde(rename = "apiVersion")]
    pub api_version: Option<String>,
    /// Chart name.
    pub name: Option<String>,
    /// The chart's declared semantic version.
    pub version: Option<String>,
    /// The version of the packaged application.
    #[serde(rename = "appVersion")]
    pub app_version: Option<String>,
}

impl ChartDefinition {
    /// Parse a chart definition from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`serde_yaml::Error`] for malformed documents;
    /// these are not handled specially anywhere and surface as a generic
    /// failure at the top level.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a chart definition from the working copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read, or a YAML parse
    /// error for malformed content.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::read(path, source))?;
        Self::parse(&text)
    }

    /// The declared version, with an empty string treated as undeclared.
    #[must_use]
    pub fn declared_version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }
}

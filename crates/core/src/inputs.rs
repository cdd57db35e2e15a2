//! Resolved gate inputs.

use secrecy::SecretString;

/// Name of the version-declaring file inside a chart directory.
pub const CHART_DEFINITION_FILE: &str = "Chart.yaml";

/// The inputs the gate runs with, resolved before any work starts.
///
/// `chart` is required (the CLI layer enforces presence); `base` is
/// optional, with an empty string treated the same as absent. The token is
/// held as a [`SecretString`] and only exposed when the hosting-API client
/// is built.
#[derive(Debug, Clone)]
pub struct GateInputs {
    /// Credential for hosting-API calls. May be empty.
    pub token: SecretString,
    /// Path to the chart directory, relative to the working-copy root.
    pub chart: String,
    /// Ref to diff against; `None` means the repository default branch.
    pub base: Option<String>,
}

impl GateInputs {
    /// Create gate inputs, normalizing an empty `base` to absent.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        chart: impl Into<String>,
        base: Option<String>,
    ) -> Self {
        Self {
            token: SecretString::from(token.into()),
            chart: chart.into(),
            base: base.filter(|b| !b.is_empty()),
        }
    }

    /// Repository-relative path of the chart definition file.
    #[must_use]
    pub fn chart_definition_path(&self) -> String {
        format!("{}/{CHART_DEFINITION_FILE}", self.chart)
    }
}

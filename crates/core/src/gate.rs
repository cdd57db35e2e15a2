//! The version gate pipeline.
//!
//! A linear short-circuit sequence: trigger check, chart presence, base-ref
//! validation, best-effort original fetch, updated-version extraction, then
//! the comparison. Policy outcomes travel as [`Verdict`] values; only
//! genuinely unexpected conditions (unreadable files, malformed documents,
//! an unparseable original version at comparison time) travel as `Err` for
//! the caller's top-level handler to convert into a generic failure.

use crate::chart::ChartDefinition;
use crate::context::ActionContext;
use crate::error::{Error, Result};
use crate::host::{RemoteContent, RepositoryHost};
use crate::inputs::GateInputs;
use semver::Version;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Why the gate failed a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The triggering event was not a pull request.
    NotPullRequest {
        /// The event that actually triggered the run.
        event: String,
    },
    /// No `Chart.yaml` exists under the given chart directory.
    NotAChartFolder {
        /// The chart directory input.
        chart: String,
    },
    /// The supplied base ref does not exist on the repository.
    RefNotFound {
        /// The ref that failed to resolve.
        reference: String,
    },
    /// The working-copy chart definition declares no version.
    MissingVersion {
        /// Path of the chart definition file.
        path: String,
    },
    /// The declared version is not a valid semantic version.
    InvalidSemver {
        /// The offending version string.
        version: String,
    },
    /// The version string is identical to the original.
    VersionUnchanged,
    /// The updated version is not strictly greater than the original.
    VersionNotIncremented {
        /// The updated version.
        updated: String,
        /// The original version.
        original: String,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPullRequest { event } => {
                write!(f, "this check can only run on pull requests (got {event})")
            }
            Self::NotAChartFolder { chart } => {
                write!(f, "{chart} is not a valid Helm chart folder")
            }
            Self::RefNotFound { reference } => {
                write!(f, "ref {reference} was not found for this repository")
            }
            Self::MissingVersion { path } => {
                write!(f, "{path} does not contain a version")
            }
            Self::InvalidSemver { version } => {
                write!(f, "{version} is not a valid SemVer version")
            }
            Self::VersionUnchanged => write!(f, "chart version has not been updated"),
            Self::VersionNotIncremented { updated, original } => {
                write!(f, "updated chart version {updated} is < {original}")
            }
        }
    }
}

/// The single outcome a run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The version was correctly incremented (or the chart is new).
    Passed {
        /// The version declared by the pull request.
        new_version: String,
        /// The version at the base ref; `None` for a new chart.
        old_version: Option<String>,
    },
    /// The pull request violates the version policy.
    Failed {
        /// Why the run failed.
        reason: FailureReason,
    },
}

impl Verdict {
    /// Shorthand for a failed verdict.
    #[must_use]
    pub const fn fail(reason: FailureReason) -> Self {
        Self::Failed { reason }
    }
}

/// The version gate.
///
/// Borrows its collaborators; running it twice over identical inputs and
/// identical remote state yields the identical verdict.
pub struct VersionGate<'a, H: RepositoryHost + ?Sized> {
    context: &'a ActionContext,
    inputs: &'a GateInputs,
    host: &'a H,
    workdir: PathBuf,
}

impl<'a, H: RepositoryHost + ?Sized> VersionGate<'a, H> {
    /// Create a gate rooted at the current working directory.
    #[must_use]
    pub fn new(context: &'a ActionContext, inputs: &'a GateInputs, host: &'a H) -> Self {
        Self {
            context,
            inputs,
            host,
            workdir: PathBuf::from("."),
        }
    }

    /// Root the working-copy lookups at a different directory.
    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Run the gate to a verdict.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for unexpected conditions: an unreadable or
    /// malformed chart definition, or an original version that cannot be
    /// parsed once the comparison is reached. Callers convert these into a
    /// generic failure report.
    pub async fn run(&self) -> Result<Verdict> {
        if !self.context.is_pull_request() {
            return Ok(Verdict::fail(FailureReason::NotPullRequest {
                event: self.context.event.clone(),
            }));
        }

        let definition_path = self.inputs.chart_definition_path();
        let local_path = self.workdir.join(&definition_path);
        if !local_path.exists() {
            return Ok(Verdict::fail(FailureReason::NotAChartFolder {
                chart: self.inputs.chart.clone(),
            }));
        }

        if let Some(base) = &self.inputs.base {
            if !self.base_ref_exists(base).await {
                return Ok(Verdict::fail(FailureReason::RefNotFound {
                    reference: base.clone(),
                }));
            }
        }

        let original_version = self.fetch_original_version(&definition_path).await?;

        let updated = ChartDefinition::load(&local_path)?;
        let Some(updated_version) = updated.declared_version() else {
            return Ok(Verdict::fail(FailureReason::MissingVersion {
                path: definition_path,
            }));
        };
        let updated_version = updated_version.to_string();
        let Ok(updated_semver) = parse_semver(&updated_version) else {
            return Ok(Verdict::fail(FailureReason::InvalidSemver {
                version: updated_version,
            }));
        };

        let Some(original_version) = original_version else {
            info!(version = %updated_version, chart = %self.inputs.chart, "new chart");
            return Ok(Verdict::Passed {
                new_version: updated_version,
                old_version: None,
            });
        };

        // Literal string comparison: a 1.0.0 -> v1.0.0 "bump" counts as a
        // change here and falls through to the ordering check.
        if updated_version == original_version {
            return Ok(Verdict::fail(FailureReason::VersionUnchanged));
        }

        let original_semver = parse_semver(&original_version)
            .map_err(|_| Error::invalid_version(&original_version))?;
        if updated_semver <= original_semver {
            return Ok(Verdict::fail(FailureReason::VersionNotIncremented {
                updated: updated_version,
                original: original_version,
            }));
        }

        info!(old = %original_version, new = %updated_version, "chart version incremented");
        Ok(Verdict::Passed {
            new_version: updated_version,
            old_version: Some(original_version),
        })
    }

    /// Resolve the supplied base ref; any lookup failure counts as absent.
    ///
    /// "Failure" includes an unresolvable repository context: without an
    /// owner/repo pair there is nothing to look the ref up against.
    async fn base_ref_exists(&self, base: &str) -> bool {
        let lookup = async {
            let repository = self.context.repository()?;
            self.host
                .ref_exists(&repository.owner, &repository.repo, base)
                .await
        };
        match lookup.await {
            Ok(found) => found,
            Err(err) => {
                debug!(reference = %base, %err, "ref lookup failed");
                false
            }
        }
    }

    /// Best-effort fetch of the version declared at the comparison ref.
    ///
    /// A failed fetch is the one tolerated failure in the pipeline: it
    /// means the chart is new. A fetched document that is malformed YAML
    /// still propagates as an error.
    async fn fetch_original_version(&self, definition_path: &str) -> Result<Option<String>> {
        let reference = self.inputs.base.clone().unwrap_or_else(|| {
            format!(
                "heads/{}",
                self.context.default_branch.as_deref().unwrap_or_default()
            )
        });

        let fetch = async {
            let repository = self.context.repository()?;
            self.host
                .file_at_ref(
                    &repository.owner,
                    &repository.repo,
                    definition_path,
                    &reference,
                )
                .await
        };
        let content = match fetch.await {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    chart = %self.inputs.chart,
                    reference = %reference,
                    %err,
                    "could not find the original Chart.yaml, assuming this is a new chart"
                );
                return Ok(None);
            }
        };

        match content {
            RemoteContent::Inline(text) => {
                let original = ChartDefinition::parse(&text)?;
                Ok(original.declared_version().map(String::from))
            }
            RemoteContent::NotInline => Ok(None),
        }
    }
}

/// Parse a declared version for validity and ordering.
///
/// Accepts surrounding whitespace and a leading `v`, the way semver
/// tooling conventionally does; the raw string is what gets compared for
/// the "unchanged" check and printed in messages.
fn parse_semver(value: &str) -> std::result::Result<Version, semver::Error> {
    let value = value.trim();
    Version::parse(value.strip_prefix('v').unwrap_or(value))
}

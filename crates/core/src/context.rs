//! GitHub Actions event context resolution.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Event name that permits the gate to run.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// The repository a workflow run belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository owner (e.g., "octo").
    pub owner: String,
    /// Repository name (e.g., "charts").
    pub repo: String,
}

/// Context information about the workflow run that invoked the gate.
///
/// Resolved once from the standard Actions environment variables and the
/// serialized event payload; immutable for the duration of the run.
///
/// Resolution itself never fails: a missing event name reads as an empty
/// string (and so fails the trigger check), and a missing or malformed
/// `GITHUB_REPOSITORY` is only an error once something actually needs the
/// repository — the gate's API calls — where it is either tolerated or
/// reported as a ref miss, the same way the runner-provided context behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    /// The event that triggered the workflow (e.g., "push", "pull_request").
    pub event: String,
    /// The owner/repo pair, when `GITHUB_REPOSITORY` was well-formed.
    pub repository: Option<Repository>,
    /// The repository default branch, if the event payload carries one.
    pub default_branch: Option<String>,
}

impl ActionContext {
    /// Resolve the context from the Actions environment.
    #[must_use]
    pub fn from_env() -> Self {
        let event = std::env::var("GITHUB_EVENT_NAME").unwrap_or_default();
        let repository = std::env::var("GITHUB_REPOSITORY")
            .ok()
            .and_then(|value| parse_repository(&value));
        let default_branch = std::env::var("GITHUB_EVENT_PATH")
            .ok()
            .and_then(|path| default_branch_from_payload(Path::new(&path)));

        Self {
            event,
            repository,
            default_branch,
        }
    }

    /// Whether the triggering event is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.event == PULL_REQUEST_EVENT
    }

    /// The repository this run belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Context`] when `GITHUB_REPOSITORY` was absent or not
    /// of the form `owner/repo`.
    pub fn repository(&self) -> Result<&Repository> {
        self.repository
            .as_ref()
            .ok_or_else(|| Error::context("GITHUB_REPOSITORY is not set or not owner/repo"))
    }
}

impl fmt::Display for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repository {
            Some(repository) => {
                write!(f, "{} on {}/{}", self.event, repository.owner, repository.repo)
            }
            None => write!(f, "{} (repository unknown)", self.event),
        }
    }
}

/// Split a `GITHUB_REPOSITORY` value into owner and repo.
fn parse_repository(repository: &str) -> Option<Repository> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Some(Repository {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        _ => None,
    }
}

/// Extract `repository.default_branch` from a serialized event payload.
///
/// Any failure along the way (unreadable file, malformed JSON, missing
/// field) yields `None`; the gate's original-version fetch then targets an
/// empty branch name and recovers through its new-chart path.
fn default_branch_from_payload(path: &Path) -> Option<String> {
    let payload = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(path = %path.display(), %err, "could not read event payload");
            return None;
        }
    };
    let payload: serde_json::Value = match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(err) => {
            debug!(path = %path.display(), %err, "could not parse event payload");
            return None;
        }
    };
    payload
        .get("repository")
        .and_then(|repository| repository.get("default_branch"))
        .and_then(serde_json::Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn context(event: &str) -> ActionContext {
        ActionContext {
            event: event.to_string(),
            repository: Some(Repository {
                owner: "octo".to_string(),
                repo: "charts".to_string(),
            }),
            default_branch: Some("main".to_string()),
        }
    }

    #[test]
    fn test_parse_repository() {
        let repository = parse_repository("octo/charts").unwrap();
        assert_eq!(repository.owner, "octo");
        assert_eq!(repository.repo, "charts");
    }

    #[test]
    fn test_parse_repository_invalid() {
        assert!(parse_repository("invalid").is_none());
        assert!(parse_repository("/repo").is_none());
        assert!(parse_repository("owner/").is_none());
        assert!(parse_repository("").is_none());
    }

    #[test]
    fn test_is_pull_request() {
        assert!(context("pull_request").is_pull_request());
        assert!(!context("push").is_pull_request());
        assert!(!context("workflow_dispatch").is_pull_request());
        // Only the exact event name counts
        assert!(!context("pull_request_target").is_pull_request());
    }

    #[test]
    fn test_repository_accessor() {
        assert!(context("pull_request").repository().is_ok());

        let ctx = ActionContext {
            repository: None,
            ..context("pull_request")
        };
        assert!(ctx.repository().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            context("pull_request").to_string(),
            "pull_request on octo/charts"
        );
        let ctx = ActionContext {
            repository: None,
            ..context("push")
        };
        assert_eq!(ctx.to_string(), "push (repository unknown)");
    }

    #[test]
    fn test_default_branch_from_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"repository": {{"default_branch": "trunk"}}}}"#).unwrap();
        assert_eq!(
            default_branch_from_payload(file.path()),
            Some("trunk".to_string())
        );
    }

    #[test]
    fn test_default_branch_missing_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"action": "opened"}}"#).unwrap();
        assert_eq!(default_branch_from_payload(file.path()), None);
    }

    #[test]
    fn test_default_branch_malformed_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(default_branch_from_payload(file.path()), None);
    }

    #[test]
    fn test_default_branch_missing_file() {
        assert_eq!(
            default_branch_from_payload(Path::new("/nonexistent/event.json")),
            None
        );
    }

    #[test]
    fn test_from_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"repository": {{"default_branch": "main"}}}}"#).unwrap();
        let payload_path = file.path().to_string_lossy().to_string();

        temp_env::with_vars(
            [
                ("GITHUB_EVENT_NAME", Some("pull_request")),
                ("GITHUB_REPOSITORY", Some("octo/charts")),
                ("GITHUB_EVENT_PATH", Some(payload_path.as_str())),
            ],
            || {
                let ctx = ActionContext::from_env();
                assert_eq!(ctx.event, "pull_request");
                let repository = ctx.repository().unwrap();
                assert_eq!(repository.owner, "octo");
                assert_eq!(repository.repo, "charts");
                assert_eq!(ctx.default_branch, Some("main".to_string()));
            },
        );
    }

    #[test]
    fn test_from_env_missing_everything() {
        temp_env::with_vars(
            [
                ("GITHUB_EVENT_NAME", None::<&str>),
                ("GITHUB_REPOSITORY", None),
                ("GITHUB_EVENT_PATH", None),
            ],
            || {
                let ctx = ActionContext::from_env();
                assert_eq!(ctx.event, "");
                assert!(!ctx.is_pull_request());
                assert!(ctx.repository().is_err());
                assert_eq!(ctx.default_branch, None);
            },
        );
    }
}

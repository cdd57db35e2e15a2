//! Verdict reporting through the Actions workflow-command protocol.
//!
//! Under a workflow run (`GITHUB_ACTIONS=true`) failure messages are
//! printed as `::error::` commands so the runner turns them into
//! annotations; elsewhere they fall back to tracing events. Plain
//! informational lines go to stdout in both modes, matching how the runner
//! treats step logs.

#![allow(clippy::print_stdout)]

use tracing::error;

/// Reporter for run outcomes and advisory messages.
#[derive(Debug, Clone)]
pub struct Reporter {
    actions: bool,
}

impl Reporter {
    /// Detect whether the process runs under a workflow.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            actions: std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"),
        }
    }

    /// Report the failure that decided the run. Called at most once.
    pub fn failure(&self, message: &str) {
        if self.actions {
            println!("{}", command("error", message));
        } else {
            error!("{message}");
        }
    }

    /// Print an informational line.
    pub fn info(&self, message: &str) {
        println!("{message}");
    }
}

/// Format a workflow command, escaping the data per the runner protocol.
fn command(kind: &str, data: &str) -> String {
    format!("::{kind}::{}", escape_data(data))
}

/// Escape message data for a workflow command.
///
/// `%`, CR, and LF must be percent-encoded or the runner truncates the
/// message at the first newline.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

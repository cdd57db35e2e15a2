//! Command-line argument surface.
//!
//! Inside a workflow the arguments arrive as `INPUT_*` environment
//! variables (the Actions runner sets one per declared input); locally the
//! flags work the same way.

use crate::trace::LogLevel;
use chartgate_core::GateInputs;
use clap::Parser;

/// Verify that a pull request incremented a Helm chart's version.
#[derive(Parser, Debug)]
#[command(name = "chartgate")]
#[command(about = "Verify that a pull request incremented a Helm chart's version")]
#[command(version)]
pub struct Cli {
    /// Path to the chart directory, relative to the working-copy root.
    #[arg(long, env = "INPUT_CHART", value_name = "DIR")]
    pub chart: String,

    /// Ref to compare against; defaults to the repository default branch.
    #[arg(long, env = "INPUT_BASE", value_name = "REF")]
    pub base: Option<String>,

    /// Token for GitHub API calls. May be empty for public repositories.
    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        default_value = "",
        value_name = "TOKEN"
    )]
    pub token: String,

    /// Logging verbosity level.
    #[arg(short = 'L', long, default_value = "info", value_enum)]
    pub level: LogLevel,

    /// Emit JSON-formatted logs.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolve the parsed arguments into gate inputs.
    #[must_use]
    pub fn into_inputs(self) -> GateInputs {
        GateInputs::new(self.token, self.chart, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        temp_env::with_vars(
            [
                ("INPUT_CHART", None::<&str>),
                ("INPUT_BASE", None),
                ("INPUT_TOKEN", None),
            ],
            || {
                let cli =
                    Cli::parse_from(["chartgate", "--chart", "charts/app", "--base", "heads/main"]);
                assert_eq!(cli.chart, "charts/app");
                assert_eq!(cli.base.as_deref(), Some("heads/main"));
                assert_eq!(cli.token, "");
            },
        );
    }

    #[test]
    fn test_parse_from_action_inputs() {
        temp_env::with_vars(
            [
                ("INPUT_CHART", Some("charts/app")),
                ("INPUT_BASE", Some("heads/release")),
                ("INPUT_TOKEN", Some("ghp_secret")),
            ],
            || {
                let cli = Cli::parse_from(["chartgate"]);
                assert_eq!(cli.chart, "charts/app");
                assert_eq!(cli.base.as_deref(), Some("heads/release"));
                assert_eq!(cli.token, "ghp_secret");
            },
        );
    }

    #[test]
    fn test_chart_is_required() {
        temp_env::with_vars([("INPUT_CHART", None::<&str>)], || {
            assert!(Cli::try_parse_from(["chartgate"]).is_err());
        });
    }

    #[test]
    fn test_empty_base_normalizes_to_absent() {
        let cli = Cli::parse_from(["chartgate", "--chart", "charts/app", "--base", ""]);
        let inputs = cli.into_inputs();
        assert_eq!(inputs.base, None);
    }
}

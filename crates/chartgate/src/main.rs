//! chartgate CLI.
//!
//! Runs the version gate against the current checkout and translates the
//! verdict into the process outcome: exit 0 when the chart version was
//! correctly incremented, exit 1 with a reported reason otherwise. Every
//! run signals exactly one verdict; unexpected errors are converted into a
//! generic failure report by the single top-level handler here.

// Binary output goes to stdout/stderr by design
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod report;
mod trace;

use chartgate_core::{ActionContext, Result, Verdict, VersionGate};
use chartgate_github::GitHubHost;
use clap::Parser;
use report::Reporter;
use trace::{TracingConfig, TracingFormat};

/// Exit code for a passing run.
const EXIT_OK: i32 = 0;
/// Exit code for a failed verdict or an unexpected error.
const EXIT_FAILED: i32 = 1;

fn main() {
    // NOTE: eprintln! in the panic hook is intentional - tracing may be
    // corrupted during a panic.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::Cli::parse();

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            std::process::exit(EXIT_FAILED);
        }
    };

    std::process::exit(rt.block_on(run(cli)));
}

/// Run the gate and translate the outcome into an exit code.
async fn run(cli: cli::Cli) -> i32 {
    let tracing_config = TracingConfig {
        format: if cli.json {
            TracingFormat::Json
        } else {
            TracingFormat::Compact
        },
        level: cli.level.into(),
    };
    // Ignore error if tracing is already initialized (e.g., in tests)
    let _ = trace::init_tracing(tracing_config);

    let reporter = Reporter::from_env();

    match execute(cli).await {
        Ok(Verdict::Passed {
            new_version,
            old_version,
        }) => {
            if let Some(old) = old_version {
                reporter.info(&format!("Old chart version: {old}"));
            }
            reporter.info(&format!("New chart version: {new_version}"));
            reporter.info("Chart version verified successfully.");
            EXIT_OK
        }
        Ok(Verdict::Failed { reason }) => {
            reporter.failure(&reason.to_string());
            EXIT_FAILED
        }
        Err(err) => {
            reporter.failure(&format!("chart version check failed: {err}"));
            EXIT_FAILED
        }
    }
}

/// Resolve context and collaborators, then run the gate to a verdict.
async fn execute(cli: cli::Cli) -> Result<Verdict> {
    let context = ActionContext::from_env();
    let inputs = cli.into_inputs();
    let host = GitHubHost::new(&inputs.token)?;
    VersionGate::new(&context, &inputs, &host).run().await
}

//! Core types and decision logic for chartgate.
//!
//! This crate holds everything the version gate needs that is independent of
//! a concrete hosting API: the Actions event context, the resolved inputs,
//! the `Chart.yaml` model, the [`RepositoryHost`] seam, and the gate
//! pipeline itself. The GitHub-backed host implementation lives in
//! `chartgate-github`; exit-code and reporting concerns live in the binary.

pub mod chart;
pub mod context;
pub mod error;
pub mod gate;
pub mod host;
pub mod inputs;

pub use chart::ChartDefinition;
pub use context::{ActionContext, Repository};
pub use error::{Error, Result};
pub use gate::{FailureReason, Verdict, VersionGate};
pub use host::{RemoteContent, RepositoryHost};
pub use inputs::GateInputs;

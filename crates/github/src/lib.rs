//! GitHub implementation of the chartgate repository-host seam.

mod host;

pub use host::GitHubHost;

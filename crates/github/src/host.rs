//! Octocrab-backed repository host.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chartgate_core::error::{Error, Result};
use chartgate_core::host::{RemoteContent, RepositoryHost};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Repository host backed by the GitHub REST API.
pub struct GitHubHost {
    client: Octocrab,
}

impl GitHubHost {
    /// Build a host from a personal token.
    ///
    /// An empty token yields an unauthenticated client, which is enough for
    /// public repositories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`] if the underlying client cannot be built.
    pub fn new(token: &SecretString) -> Result<Self> {
        let builder = Octocrab::builder();
        let builder = if token.expose_secret().is_empty() {
            builder
        } else {
            builder.personal_token(token.expose_secret().to_string())
        };
        let client = builder
            .build()
            .map_err(|e| Error::host(format!("failed to build GitHub client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already-configured client.
    #[must_use]
    pub const fn with_client(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn ref_exists(&self, owner: &str, repo: &str, reference: &str) -> Result<bool> {
        // The ref is forwarded verbatim; "refs/heads/x" misses where
        // "heads/x" hits, and callers rely on that.
        let route = ref_route(owner, repo, reference);
        match self
            .client
            .get::<serde_json::Value, _, _>(&route, None::<&()>)
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                debug!(%route, %err, "git ref lookup failed");
                Ok(false)
            }
        }
    }

    async fn file_at_ref(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<RemoteContent> {
        let response = self
            .client
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await
            .map_err(|e| Error::host(format!("failed to fetch {path} at {reference}: {e}")))?;

        // A directory listing comes back as multiple items; a single item
        // without an inline payload is a large-file or submodule pointer.
        let [item] = response.items.as_slice() else {
            return Ok(RemoteContent::NotInline);
        };
        match &item.content {
            Some(encoded) => Ok(RemoteContent::Inline(decode_inline(encoded)?)),
            None => Ok(RemoteContent::NotInline),
        }
    }
}

/// API route for a git ref lookup.
fn ref_route(owner: &str, repo: &str, reference: &str) -> String {
    format!("/repos/{owner}/{repo}/git/ref/{reference}")
}

/// Decode the base64 payload of a contents response.
///
/// The API wraps the payload at 60 columns, so embedded newlines are
/// stripped before decoding.
fn decode_inline(encoded: &str) -> Result<String> {
    let compact: String = encoded.split_whitespace().collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| Error::host(format!("content is not valid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::host(format!("content is not valid UTF-8: {e}")))
}

//! External rewrite capability.
//!
//! The LLM call is modeled as an injectable trait so the HTTP layer and the
//! tests never need real network access; the only production implementation
//! talks to the Perplexity chat-completions API.

mod perplexity;
mod prompt;

use async_trait::async_trait;

use crate::errors::TaskResult;

pub use perplexity::PerplexityProvider;
pub use prompt::{build_rewrite_prompt, REWRITE_SYSTEM_PROMPT};

/// Opaque text-rewrite capability: given text and a style, return the
/// rewritten text or fail with [`crate::TaskError::Upstream`].
///
/// Callers must recover from any failure with
/// [`crate::heuristics::fallback_rewrite`]; an unavailable provider is never a
/// hard error for end users. Credential state is only ever exposed through
/// [`RewriteProvider::is_configured`].
#[async_trait]
pub trait RewriteProvider: Send + Sync {
    /// Provider identifier for logging.
    fn name(&self) -> &str;

    /// Whether a credential is available.
    fn is_configured(&self) -> bool;

    /// Rewrite `text` according to `style`.
    async fn rewrite(&self, text: &str, style: &str) -> TaskResult<String>;
}

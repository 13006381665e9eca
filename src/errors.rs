//! Error taxonomy for the digest pipeline.
//!
//! Three failure classes cross module boundaries:
//! - [`DigestError::InvalidInput`]: a malformed month argument or page cap,
//!   reported to the user before any network traffic.
//! - [`DigestError::Transport`]: a network failure or non-success HTTP status
//!   from either the listing site or the chat API. The month scanner recovers
//!   from these by skipping the page; the enrichment loop only recovers when
//!   `--allow-partial` is set.
//! - [`DigestError::Api`]: the chat API answered but the response was unusable.
//!
//! Date-parse failures are deliberately not an error anywhere; they are
//! modeled as `Option` and excluded from date-based decisions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    /// Malformed month argument or a page cap of zero.
    #[error("{0}")]
    InvalidInput(String),

    /// Network failure or non-success HTTP status.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The chat API returned a response with no usable completion.
    #[error("chat api: {0}")]
    Api(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DigestError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }
}

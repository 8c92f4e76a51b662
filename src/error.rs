//! Error types for URL resolution, fetching, styling, and PDF serialization.
//!
//! Rendering itself is total and has no error path; everything that can fail
//! lives at the boundaries. Servers embedding the library conventionally map
//! the URL variants to 400, [`Error::EmptyDocument`] to 422, the fetch
//! variants to 502, and the rest to 500.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be parsed as an http(s) URL at all.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Parseable, but not a github.com blob URL or raw.githubusercontent.com URL.
    #[error("unsupported GitHub URL (expected github.com/<owner>/<repo>/blob/<ref>/<path> or raw.githubusercontent.com): {0}")]
    UnsupportedUrl(String),

    /// The addressed file does not end in `.md`.
    #[error("not a Markdown file: {0}")]
    NotMarkdown(String),

    /// The fetched body was empty or whitespace-only.
    #[error("fetched document is empty")]
    EmptyDocument,

    /// The upstream host answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    /// Transport-level fetch failure (DNS, TLS, timeout, ...).
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// PDF document assembly or serialization failed.
    #[error("failed to write PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The style file was not valid TOML for [`crate::style::Style`].
    #[error("invalid style file: {0}")]
    Style(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//! Downloads the raw Markdown document behind a resolved URL.

use std::time::Duration;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("mdpress/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `url` and returns its body as text.
///
/// Non-success statuses, transport failures, and bodies over ureq's built-in
/// read cap all fail; so does a body that is empty after trimming, since an
/// empty document almost always means a wrong ref or path rather than a file
/// someone wants typeset.
pub fn fetch_markdown(url: &str) -> Result<String> {
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(TIMEOUT))
        .build()
        .new_agent();

    log::debug!("GET {url}");
    let mut response = match agent
        .get(url)
        .header("Accept", "text/plain")
        .header("User-Agent", USER_AGENT)
        .call()
    {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(status)) => {
            return Err(Error::FetchStatus {
                url: url.to_string(),
                status,
            });
        }
        Err(source) => {
            return Err(Error::Fetch {
                url: url.to_string(),
                source: Box::new(source),
            });
        }
    };

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|source| Error::Fetch {
            url: url.to_string(),
            source: Box::new(source),
        })?;

    if body.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }
    log::debug!("fetched {} bytes from {url}", body.len());
    Ok(body)
}

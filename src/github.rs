//! Maps user-facing GitHub URLs to raw-content URLs and derives file names.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::error::{Error, Result};

static RE_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

const RAW_HOST: &str = "raw.githubusercontent.com";
const FALLBACK_FILE: &str = "document.md";
const MAX_STEM: usize = 128;

/// A resolved source document: where to fetch it and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub raw_url: String,
    pub file_name: String,
}

/// Resolves a user-supplied URL to the raw Markdown document behind it.
///
/// `https://github.com/<owner>/<repo>/blob/<ref>/<path>` URLs map onto
/// `raw.githubusercontent.com`; raw URLs pass through unchanged apart from
/// their fragment. The addressed file must end in `.md`.
pub fn resolve_url(input: &str) -> Result<RawDocument> {
    let (scheme, host, rest) = split_url(input)?;
    // fragments are client-side only, never sent upstream
    let rest = rest.split('#').next().unwrap_or("");
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    if host == RAW_HOST {
        let file_name = file_name_of(path);
        ensure_markdown(&file_name)?;
        let mut raw_url = format!("{scheme}://{RAW_HOST}{path}");
        if let Some(query) = query {
            raw_url.push('?');
            raw_url.push_str(query);
        }
        log::debug!("raw URL passes through as {raw_url}");
        return Ok(RawDocument { raw_url, file_name });
    }

    if host == "github.com" {
        let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        if let Some(blob) = parts.iter().position(|part| *part == "blob") {
            if parts.len() >= blob + 2 {
                let file_path = parts[blob + 2..].join("/");
                let file_name = file_name_of(&file_path);
                ensure_markdown(&file_name)?;
                let raw_url = format!(
                    "https://{RAW_HOST}/{}/{}/{}/{file_path}",
                    parts[0],
                    parts[1],
                    parts[blob + 1],
                );
                log::debug!("{input} resolves to {raw_url}");
                return Ok(RawDocument { raw_url, file_name });
            }
        }
    }

    Err(Error::UnsupportedUrl(input.to_string()))
}

/// Title for a Markdown file name: the name with its `.md` suffix dropped,
/// matched case-insensitively.
pub fn document_title(md_name: &str) -> &str {
    if md_name.len() >= 3 && md_name.is_char_boundary(md_name.len() - 3) {
        let (stem, ext) = md_name.split_at(md_name.len() - 3);
        if ext.eq_ignore_ascii_case(".md") {
            return stem;
        }
    }
    md_name
}

/// Output name for the generated PDF. The stem is the Markdown name without
/// its extension, with every run of characters outside `A-Za-z0-9._-`
/// collapsed to a single `_` and capped at 128 characters.
pub fn pdf_file_name(md_name: &str) -> String {
    let safe = RE_UNSAFE.replace_all(document_title(md_name), "_");
    let mut stem: String = safe.chars().take(MAX_STEM).collect();
    if stem.is_empty() {
        stem.push_str("document");
    }
    stem.push_str(".pdf");
    stem
}

/// Splits `scheme://authority/rest`. Only http(s) inputs are accepted; the
/// host comes back lowercased with userinfo and port stripped.
fn split_url(input: &str) -> Result<(&'static str, String, &str)> {
    let (scheme, after) = if let Some(after) = input.strip_prefix("https://") {
        ("https", after)
    } else if let Some(after) = input.strip_prefix("http://") {
        ("http", after)
    } else {
        return Err(Error::InvalidUrl(input.to_string()));
    };
    let (authority, rest) = match after.find(['/', '?', '#']) {
        Some(i) => (&after[..i], &after[i..]),
        None => (after, ""),
    };
    if authority.is_empty() {
        return Err(Error::InvalidUrl(input.to_string()));
    }
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    Ok((scheme, host.to_ascii_lowercase(), rest))
}

/// Last non-empty path segment, percent-decoded, or the shared fallback when
/// the path has none.
fn file_name_of(path: &str) -> String {
    match path.rsplit('/').find(|segment| !segment.is_empty()) {
        Some(last) => percent_decode_str(last).decode_utf8_lossy().into_owned(),
        None => FALLBACK_FILE.to_string(),
    }
}

fn ensure_markdown(file_name: &str) -> Result<()> {
    if file_name.to_ascii_lowercase().ends_with(".md") {
        Ok(())
    } else {
        Err(Error::NotMarkdown(file_name.to_string()))
    }
}

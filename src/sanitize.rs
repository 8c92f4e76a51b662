//! Text normalization for the single-byte WinAnsi fonts.
//!
//! GitHub Markdown arrives with inline HTML, smart punctuation and emoji that
//! the base-14 fonts cannot set. [`strip_html`] removes markup while keeping
//! visible text; [`sanitize`] degrades what remains to WinAnsi-safe
//! characters. Code inside fences is never HTML-stripped, only sanitized.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<span\b[^>]*>(.*?)</span>").unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+>").unwrap());

/// Blocks removed outright rather than degraded to `?`:
/// - 0x1F000..=0x1FAFF (emoji, pictographs, regional-indicator flags)
/// - 0x2600..=0x27BF (miscellaneous symbols and dingbats)
fn is_pictograph(c: char) -> bool {
    matches!(c as u32, 0x1F000..=0x1FAFF | 0x2600..=0x27BF)
}

/// Decode the small entity set GitHub READMEs actually contain.
/// Replacements run in sequence, so double-encoded entities collapse
/// stepwise (`&amp;lt;` becomes `<`).
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
}

/// Drop inline HTML, keeping visible text. `<span ...>inner</span>` keeps
/// `inner`; every other tag is removed outright. Entities decode last so tag
/// stripping still sees the encoded form.
pub fn strip_html(text: &str) -> String {
    let out = RE_SPAN.replace_all(text, "$1");
    let out = RE_TAG.replace_all(&out, "");
    decode_entities(&out)
}

/// Reduce `text` to characters the WinAnsi fonts can set: smart quotes,
/// dashes, ellipses and non-breaking spaces fold to their ASCII forms,
/// pictographs vanish, and anything else above 0xFF becomes a visible `?`.
/// Total and idempotent.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            c if is_pictograph(c) => {}
            c if (c as u32) <= 0xFF => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

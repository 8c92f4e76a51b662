//! Line classification. Each raw Markdown line maps to exactly one
//! [`LineKind`], checked in a fixed precedence order. Classification is
//! line-local; the only cross-line state is the fenced-code toggle, and that
//! lives in the renderer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sanitize::{sanitize, strip_html};

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());
static RE_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\.\s+(.*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A triple-backtick delimiter; the renderer toggles fenced-code mode.
    Fence,
    Heading { level: u8, text: String },
    Bullet { text: String },
    Ordered { label: String, text: String },
    Blank,
    Paragraph { text: String },
}

/// Classify one raw line. Fence detection happens on the raw trimmed line,
/// since code content must never be HTML-stripped; every other kind matches
/// against the HTML-stripped, sanitized line.
pub fn classify(raw: &str) -> LineKind {
    if raw.trim().starts_with("```") {
        return LineKind::Fence;
    }

    let clean = sanitize(&strip_html(raw));

    if let Some(caps) = RE_HEADING.captures(&clean) {
        return LineKind::Heading {
            level: caps[1].len() as u8,
            text: caps[2].to_string(),
        };
    }
    if let Some(caps) = RE_BULLET.captures(&clean) {
        return LineKind::Bullet {
            text: caps[1].to_string(),
        };
    }
    if let Some(caps) = RE_ORDERED.captures(&clean) {
        return LineKind::Ordered {
            label: format!("{}. ", &caps[1]),
            text: caps[2].to_string(),
        };
    }
    if clean.trim().is_empty() {
        return LineKind::Blank;
    }
    LineKind::Paragraph { text: clean }
}

#[cfg(test)]
mod tests {
    use super::{LineKind, classify};

    #[test]
    fn headings_carry_level_and_text() {
        assert_eq!(
            classify("# Top"),
            LineKind::Heading {
                level: 1,
                text: "Top".to_string()
            }
        );
        assert_eq!(
            classify("###### Deep"),
            LineKind::Heading {
                level: 6,
                text: "Deep".to_string()
            }
        );
    }

    #[test]
    fn seven_hashes_or_missing_space_is_paragraph() {
        assert!(matches!(classify("####### too deep"), LineKind::Paragraph { .. }));
        assert!(matches!(classify("#nospace"), LineKind::Paragraph { .. }));
    }

    #[test]
    fn bullets_accept_both_markers_and_indentation() {
        assert_eq!(
            classify("- item"),
            LineKind::Bullet {
                text: "item".to_string()
            }
        );
        assert_eq!(
            classify("  * indented"),
            LineKind::Bullet {
                text: "indented".to_string()
            }
        );
        assert!(matches!(classify("-glued"), LineKind::Paragraph { .. }));
    }

    #[test]
    fn ordered_items_keep_their_number() {
        assert_eq!(
            classify("12. twelfth"),
            LineKind::Ordered {
                label: "12. ".to_string(),
                text: "twelfth".to_string()
            }
        );
        assert!(matches!(classify("3.glued"), LineKind::Paragraph { .. }));
    }

    #[test]
    fn fence_wins_over_everything_and_ignores_info_string() {
        assert_eq!(classify("```"), LineKind::Fence);
        assert_eq!(classify("  ```rust"), LineKind::Fence);
        assert_eq!(classify("``` # not a heading"), LineKind::Fence);
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Blank);
    }

    #[test]
    fn tags_are_stripped_before_matching() {
        assert_eq!(
            classify("# <span class=\"x\">Hi</span>"),
            LineKind::Heading {
                level: 1,
                text: "Hi".to_string()
            }
        );
        // a line that is only markup collapses to blank
        assert_eq!(classify("<br/>"), LineKind::Blank);
    }

    #[test]
    fn inline_emphasis_stays_literal() {
        assert_eq!(
            classify("Some **text**."),
            LineKind::Paragraph {
                text: "Some **text**.".to_string()
            }
        );
    }

    #[test]
    fn bare_marker_is_an_empty_item() {
        assert_eq!(
            classify("- "),
            LineKind::Bullet {
                text: String::new()
            }
        );
    }
}

//! The layout engine: classified Markdown lines become pages of
//! absolute-positioned draw calls.
//!
//! One [`Renderer`] is built per document. It owns the cursor, walks the
//! document line by line, and drives a [`Canvas`]. Rendering is total: a line
//! that matches no other shape is set as a plain paragraph, unsupported
//! characters have already been degraded by the sanitizer, and the engine
//! never runs out of room, it allocates pages instead.

use crate::canvas::{Canvas, Color, Font, Rect};
use crate::classify::{LineKind, classify};
use crate::error::Result;
use crate::pdf::PdfCanvas;
use crate::sanitize::sanitize;
use crate::style::Style;

const HEADING_GAP_BEFORE: f32 = 2.0;
const HEADING_GAP_AFTER_MAJOR: f32 = 6.0;
const HEADING_GAP_AFTER_MINOR: f32 = 4.0;

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 16.0,
        2 => 14.0,
        3 => 12.0,
        _ => 11.0,
    }
}

/// Render `markdown` to finished PDF bytes on the built-in lopdf canvas.
/// `title` is stamped into the document information dictionary. Accepts any
/// UTF-8 input, including the empty string; the only failure mode is PDF
/// serialization itself.
pub fn render_markdown(markdown: &str, title: Option<&str>, style: &Style) -> Result<Vec<u8>> {
    let title = title.map(sanitize);
    let mut canvas = PdfCanvas::new(style.page_width, style.page_height, title.as_deref());
    Renderer::new(&mut canvas, style).render(markdown);
    canvas.finish()
}

/// Greedy word wrap. Words are whitespace-separated runs; a word joins the
/// current line if the joined line still measures within `max_width`,
/// otherwise the line is flushed. A single word wider than `max_width` is
/// emitted alone, unsplit. Empty or all-whitespace input produces no lines.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measure(&candidate) > max_width {
            if line.is_empty() {
                lines.push(word.to_string());
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Greedy character wrap for code lines, which must keep their exact spacing
/// and may lack word boundaries. Tabs expand to two spaces before
/// measurement. An empty line yields one single-space line so blank lines
/// keep their vertical slot inside a code block.
pub fn wrap_mono<F>(line: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(char) -> f32,
{
    let expanded = line.replace('\t', "  ");
    if expanded.is_empty() {
        return vec![" ".to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0f32;
    for c in expanded.chars() {
        let w = measure(c);
        if width + w > max_width {
            if current.is_empty() {
                lines.push(c.to_string());
                width = 0.0;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push(c);
                width = w;
            }
        } else {
            current.push(c);
            width += w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cursor, fenced-code state, and the dispatch from [`LineKind`] to draw
/// calls. Built fresh per document.
pub struct Renderer<'a, C: Canvas> {
    canvas: &'a mut C,
    style: &'a Style,
    x: f32,
    y: f32,
    in_code: bool,
    code_buffer: Vec<String>,
}

impl<'a, C: Canvas> Renderer<'a, C> {
    /// Builds the context and opens the first page.
    pub fn new(canvas: &'a mut C, style: &'a Style) -> Self {
        canvas.begin_page();
        Renderer {
            canvas,
            style,
            x: style.margin,
            y: style.page_height - style.margin,
            in_code: false,
            code_buffer: Vec::new(),
        }
    }

    /// Feed the whole document through the engine. An unclosed fence is
    /// flushed as a final code block.
    pub fn render(&mut self, markdown: &str) {
        let normalized = markdown.replace("\r\n", "\n");
        for raw in normalized.split('\n') {
            self.render_line(raw);
        }
        if self.in_code && !self.code_buffer.is_empty() {
            self.flush_code_block();
        }
    }

    fn render_line(&mut self, raw: &str) {
        match classify(raw) {
            LineKind::Fence => {
                if self.in_code {
                    self.flush_code_block();
                    self.in_code = false;
                } else {
                    self.in_code = true;
                    self.code_buffer.clear();
                }
            }
            // inside a fence everything is code, verbatim
            _ if self.in_code => self.code_buffer.push(raw.to_string()),
            LineKind::Heading { level, text } => self.draw_heading(level, &text),
            LineKind::Bullet { text } => self.draw_item("• ", &text),
            LineKind::Ordered { label, text } => self.draw_item(&label, &text),
            LineKind::Blank => self.y -= self.style.blank_line_gap,
            LineKind::Paragraph { text } => self.draw_wrapped(
                &text,
                Font::Regular,
                self.style.body_size,
                self.style.text_color,
            ),
        }
    }

    fn draw_heading(&mut self, level: u8, text: &str) {
        if level <= 2 {
            self.y -= HEADING_GAP_BEFORE;
        }
        self.draw_wrapped(text, Font::Bold, heading_size(level), self.style.text_color);
        self.y -= if level <= 2 {
            HEADING_GAP_AFTER_MAJOR
        } else {
            HEADING_GAP_AFTER_MINOR
        };
    }

    /// Marker plus shifted item body. The page-break check runs before the
    /// marker so the marker and the first text line share a baseline; x is
    /// restored to its saved value afterward, which keeps x = margin even
    /// when the item body broke onto a new page.
    fn draw_item(&mut self, marker: &str, text: &str) {
        if self.y < self.style.bottom_margin {
            self.new_page();
        }
        let size = self.style.body_size;
        self.canvas
            .draw_text(self.x, self.y, marker, Font::Regular, size, self.style.text_color);
        let marker_width = self.canvas.text_width(Font::Regular, size, marker);
        let saved_x = self.x;
        self.x += marker_width;
        self.draw_wrapped(text, Font::Regular, size, self.style.text_color);
        self.x = saved_x;
    }

    fn draw_wrapped(&mut self, text: &str, font: Font, size: f32, color: Color) {
        let lines = wrap_words(text, self.style.content_width(), |s| {
            self.canvas.text_width(font, size, s)
        });
        for line in lines {
            if self.y < self.style.bottom_margin {
                self.new_page();
            }
            self.canvas.draw_text(self.x, self.y, &line, font, size, color);
            self.y -= size + self.style.line_gap;
        }
    }

    fn flush_code_block(&mut self) {
        let buffer = std::mem::take(&mut self.code_buffer);
        let style = self.style;
        let max_text_width = style.content_width() - 2.0 * style.code_padding_x;
        let size = style.code_size;

        let wrapped: Vec<String> = buffer
            .iter()
            .flat_map(|raw| {
                wrap_mono(&sanitize(raw), max_text_width, |c| {
                    let mut buf = [0u8; 4];
                    self.canvas.text_width(Font::Mono, size, c.encode_utf8(&mut buf))
                })
            })
            .collect();
        if wrapped.is_empty() {
            return;
        }

        let line_height = size + style.code_line_gap;
        let mut i = 0;
        let mut fresh_page = false;
        while i < wrapped.len() {
            let available = self.y - style.bottom_margin;
            let capacity = ((available - 2.0 * style.code_padding_y) / line_height).floor();
            if capacity < 1.0 && !fresh_page {
                self.new_page();
                fresh_page = true;
                continue;
            }
            // even a degenerate page takes one line, so the loop advances
            let take = (capacity.max(1.0) as usize).min(wrapped.len() - i);
            fresh_page = false;

            let chunk = &wrapped[i..i + take];
            let inner_height =
                chunk.len() as f32 * size + (chunk.len() - 1) as f32 * style.code_line_gap;
            let total_height = inner_height + 2.0 * style.code_padding_y;

            self.canvas.draw_rect(
                Rect {
                    x: self.x,
                    y: self.y - total_height,
                    width: style.content_width(),
                    height: total_height,
                },
                style.code_background,
                style.code_border_color,
                style.code_border_width,
            );

            let mut line_y = self.y - style.code_padding_y - size;
            for line in chunk {
                self.canvas.draw_text(
                    self.x + style.code_padding_x,
                    line_y,
                    line,
                    Font::Mono,
                    size,
                    style.code_text_color,
                );
                line_y -= line_height;
            }

            self.y -= total_height + style.line_gap;
            i += take;
        }
    }

    fn new_page(&mut self) {
        self.canvas.begin_page();
        self.x = self.style.margin;
        self.y = self.style.page_height - self.style.margin;
    }
}

#[cfg(test)]
mod tests {
    use super::{Renderer, wrap_mono, wrap_words};
    use crate::canvas::{Canvas, Color, Font, Rect};
    use crate::metrics;
    use crate::style::Style;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Page,
        Text {
            x: f32,
            y: f32,
            text: String,
            font: Font,
            size: f32,
        },
        Rect {
            x: f32,
            y: f32,
            width: f32,
            height: f32,
        },
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl RecordingCanvas {
        fn pages(&self) -> usize {
            self.ops.iter().filter(|op| **op == Op::Page).count()
        }

        fn rects(&self) -> Vec<&Op> {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Rect { .. }))
                .collect()
        }

        fn texts(&self) -> Vec<(&str, Font, f32, f32, f32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text {
                        x,
                        y,
                        text,
                        font,
                        size,
                    } => Some((text.as_str(), *font, *size, *x, *y)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn begin_page(&mut self) {
            self.ops.push(Op::Page);
        }

        fn text_width(&self, font: Font, size: f32, text: &str) -> f32 {
            metrics::text_width(font, size, text)
        }

        fn draw_text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, _color: Color) {
            self.ops.push(Op::Text {
                x,
                y,
                text: text.to_string(),
                font,
                size,
            });
        }

        fn draw_rect(&mut self, rect: Rect, _fill: Color, _border: Color, _border_width: f32) {
            self.ops.push(Op::Rect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            });
        }
    }

    fn render_with(style: &Style, markdown: &str) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::default();
        Renderer::new(&mut canvas, style).render(markdown);
        canvas
    }

    fn render(markdown: &str) -> RecordingCanvas {
        render_with(&Style::default(), markdown)
    }

    #[test]
    fn wrap_words_packs_greedily() {
        // width oracle: one unit per character
        let lines = wrap_words("aa bb cc dd", 5.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn wrap_words_emits_overlong_word_unsplit() {
        let lines = wrap_words("tiny incomprehensibilities end", 6.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["tiny", "incomprehensibilities", "end"]);
    }

    #[test]
    fn wrap_words_empty_input_yields_no_lines() {
        assert!(wrap_words("", 100.0, |s| s.len() as f32).is_empty());
        assert!(wrap_words("   \t ", 100.0, |s| s.len() as f32).is_empty());
    }

    #[test]
    fn wrap_mono_preserves_spacing_and_blanks() {
        assert_eq!(wrap_mono("", 10.0, |_| 1.0), vec![" "]);
        assert_eq!(wrap_mono("\tx", 10.0, |_| 1.0), vec!["  x"]);
        let lines = wrap_mono("abcdef", 3.0, |_| 1.0);
        assert_eq!(lines, vec!["abc", "def"]);
    }

    #[test]
    fn empty_document_is_one_page_with_no_text() {
        let canvas = render("");
        assert_eq!(canvas.pages(), 1);
        assert!(canvas.texts().is_empty());
        assert!(canvas.rects().is_empty());
    }

    #[test]
    fn heading_paragraph_and_code_land_where_expected() {
        let canvas = render("# Hi\n\nSome **text**.\n\n```\ncode line\n```\n");

        assert_eq!(canvas.pages(), 1);
        let texts = canvas.texts();
        assert_eq!(texts.len(), 3);

        // heading: 2pt pre-gap below the 742pt start
        assert_eq!(texts[0], ("Hi", Font::Bold, 16.0, 50.0, 740.0));
        // blank gap after heading post-gap: 742-2-20-6-6 = 708
        assert_eq!(texts[1], ("Some **text**.", Font::Regular, 10.0, 50.0, 708.0));
        // code text starts below the rect's top padding
        assert_eq!(texts[2], ("code line", Font::Mono, 9.0, 58.0, 673.0));

        let rects = canvas.rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(
            *rects[0],
            Op::Rect {
                x: 50.0,
                y: 667.0,
                width: 512.0,
                height: 21.0,
            }
        );
    }

    #[test]
    fn heading_consumes_more_vertical_space_than_a_paragraph_line() {
        let heading = render("## Title\nafter");
        let paragraph = render("plain\nafter");
        let y_after_heading = heading.texts()[1].4;
        let y_after_paragraph = paragraph.texts()[1].4;
        assert_eq!(heading.texts()[0].1, Font::Bold);
        assert_eq!(heading.texts()[0].2, 14.0);
        assert!(y_after_heading < y_after_paragraph);
    }

    fn short_page() -> Style {
        Style {
            page_height: 200.0,
            ..Style::default()
        }
    }

    #[test]
    fn code_block_chunks_once_per_page() {
        // start y = 150; per page: floor((150-60-12)/11) = 7 lines
        let mut doc = String::from("```\n");
        for i in 0..20 {
            doc.push_str(&format!("l{i}\n"));
        }
        doc.push_str("```\n");
        let canvas = render_with(&short_page(), &doc);

        assert_eq!(canvas.rects().len(), 3, "ceil(20/7) chunks");
        assert_eq!(canvas.pages(), 3);

        // every rect sits at the top of its page
        let expected_heights = [7, 7, 6].map(|n: i32| n as f32 * 9.0 + (n - 1) as f32 * 2.0 + 12.0);
        for (rect, expected) in canvas.rects().iter().zip(expected_heights) {
            match rect {
                Op::Rect { y, height, .. } => {
                    assert_eq!(*height, expected);
                    assert_eq!(*y, 150.0 - *height);
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn paragraph_breaks_page_exactly_once_and_continues_at_margin() {
        // content width 20pt: every "aa" word (11.12pt) gets its own line
        let style = Style {
            page_width: 120.0,
            page_height: 200.0,
            ..Style::default()
        };
        let words = vec!["aa"; 9].join(" ");
        let canvas = render_with(&style, &words);

        assert_eq!(canvas.pages(), 2);
        let texts = canvas.texts();
        assert_eq!(texts.len(), 9);
        // lines at 150,136,...,66 fit; the 8th line resets to a fresh page
        assert_eq!(texts[6].4, 66.0);
        assert_eq!(texts[7].3, 50.0);
        assert_eq!(texts[7].4, 150.0);
        assert_eq!(texts[8].4, 136.0);
    }

    #[test]
    fn bullet_shifts_body_and_restores_x() {
        let canvas = render("- alpha\n- beta");
        let texts = canvas.texts();
        assert_eq!(texts[0].0, "• ");
        let marker_width = metrics::text_width(Font::Regular, 10.0, "• ");
        assert_eq!(texts[1], ("alpha", Font::Regular, 10.0, 50.0 + marker_width, 742.0));
        // second item's marker is back at the margin
        assert_eq!(texts[2].3, 50.0);
    }

    #[test]
    fn wrapped_bullet_continuation_aligns_under_first_word() {
        let style = Style {
            page_width: 160.0,
            ..Style::default()
        };
        let canvas = render_with(&style, "- alpha beta gamma delta epsilon");
        let texts = canvas.texts();
        assert!(texts.len() > 2, "body must wrap");
        let body_x = texts[1].3;
        for (_, _, _, x, _) in &texts[1..] {
            assert_eq!(*x, body_x);
        }
    }

    #[test]
    fn ordered_item_uses_its_own_label_width() {
        let canvas = render("12. twelfth");
        let texts = canvas.texts();
        assert_eq!(texts[0].0, "12. ");
        let label_width = metrics::text_width(Font::Regular, 10.0, "12. ");
        assert_eq!(texts[1].3, 50.0 + label_width);
    }

    #[test]
    fn unclosed_fence_flushes_at_end_of_document() {
        let canvas = render("```\ndangling code");
        assert_eq!(canvas.rects().len(), 1);
        assert_eq!(canvas.texts()[0].0, "dangling code");
        assert_eq!(canvas.texts()[0].1, Font::Mono);
    }

    #[test]
    fn blank_lines_inside_code_keep_their_slot() {
        let canvas = render("```\nfirst\n\nlast\n```");
        let texts: Vec<&str> = canvas.texts().iter().map(|t| t.0).collect();
        assert_eq!(texts, vec!["first", " ", "last"]);
    }

    #[test]
    fn empty_code_block_draws_nothing() {
        let canvas = render("```\n```");
        assert!(canvas.rects().is_empty());
        assert!(canvas.texts().is_empty());
    }

    #[test]
    fn fence_info_string_is_ignored() {
        let canvas = render("```rust\nlet x = 1;\n```");
        assert_eq!(canvas.texts()[0].0, "let x = 1;");
    }

    #[test]
    fn crlf_documents_normalize() {
        let canvas = render("# Hi\r\nbody");
        let texts = canvas.texts();
        assert_eq!(texts[0].0, "Hi");
        assert_eq!(texts[1].0, "body");
    }

    proptest! {
        #[test]
        fn prop_wrapped_lines_fit_or_are_single_words(
            words in prop::collection::vec("[a-zA-Z0-9,.:;!?']{1,14}", 1..40)
        ) {
            let text = words.join(" ");
            let max = 120.0;
            let measure = |s: &str| metrics::text_width(Font::Regular, 10.0, s);
            for line in wrap_words(&text, max, measure) {
                prop_assert!(measure(&line) <= max || !line.contains(' '));
            }
        }

        #[test]
        fn prop_mono_wrap_concatenates_back(s in "[ -~\\t]{0,80}") {
            let wrapped = wrap_mono(&s, 60.0, |_| 5.4);
            let expanded = s.replace('\t', "  ");
            if expanded.is_empty() {
                prop_assert_eq!(wrapped, vec![" ".to_string()]);
            } else {
                prop_assert_eq!(wrapped.concat(), expanded);
            }
        }
    }
}

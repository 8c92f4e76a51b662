use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::error::Result;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 50.0;
const BOTTOM_MARGIN: f32 = 60.0;
const LINE_GAP: f32 = 4.0;
const BODY_SIZE: f32 = 10.0;
const BLANK_LINE_GAP: f32 = 6.0;
const CODE_SIZE: f32 = 9.0;
const CODE_LINE_GAP: f32 = 2.0;
const CODE_PADDING_X: f32 = 8.0;
const CODE_PADDING_Y: f32 = 6.0;
const CODE_BORDER_WIDTH: f32 = 1.0;

const TEXT_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};
const CODE_TEXT_COLOR: Color = Color {
    r: 0.15,
    g: 0.15,
    b: 0.15,
};
const CODE_BACKGROUND: Color = Color {
    r: 0.96,
    g: 0.96,
    b: 0.96,
};
const CODE_BORDER_COLOR: Color = Color {
    r: 0.85,
    g: 0.85,
    b: 0.85,
};

/// Page geometry, typography and colors. Every field has a default, so a
/// style file only needs the values it wants to change; colors are `#rrggbb`
/// strings in TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    /// Top and side margin; the cursor starts at (margin, page_height - margin).
    #[serde(default = "default_margin")]
    pub margin: f32,
    /// Content stops and a new page begins once the cursor drops below this y.
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: f32,
    #[serde(default = "default_line_gap")]
    pub line_gap: f32,
    #[serde(default = "default_body_size")]
    pub body_size: f32,
    #[serde(default = "default_blank_line_gap")]
    pub blank_line_gap: f32,

    #[serde(default = "default_code_size")]
    pub code_size: f32,
    #[serde(default = "default_code_line_gap")]
    pub code_line_gap: f32,
    #[serde(default = "default_code_padding_x")]
    pub code_padding_x: f32,
    #[serde(default = "default_code_padding_y")]
    pub code_padding_y: f32,
    #[serde(default = "default_code_border_width")]
    pub code_border_width: f32,

    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_code_text_color")]
    pub code_text_color: Color,
    #[serde(default = "default_code_background")]
    pub code_background: Color,
    #[serde(default = "default_code_border_color")]
    pub code_border_color: Color,
}

fn default_page_width() -> f32 {
    PAGE_WIDTH
}
fn default_page_height() -> f32 {
    PAGE_HEIGHT
}
fn default_margin() -> f32 {
    MARGIN
}
fn default_bottom_margin() -> f32 {
    BOTTOM_MARGIN
}
fn default_line_gap() -> f32 {
    LINE_GAP
}
fn default_body_size() -> f32 {
    BODY_SIZE
}
fn default_blank_line_gap() -> f32 {
    BLANK_LINE_GAP
}
fn default_code_size() -> f32 {
    CODE_SIZE
}
fn default_code_line_gap() -> f32 {
    CODE_LINE_GAP
}
fn default_code_padding_x() -> f32 {
    CODE_PADDING_X
}
fn default_code_padding_y() -> f32 {
    CODE_PADDING_Y
}
fn default_code_border_width() -> f32 {
    CODE_BORDER_WIDTH
}
fn default_text_color() -> Color {
    TEXT_COLOR
}
fn default_code_text_color() -> Color {
    CODE_TEXT_COLOR
}
fn default_code_background() -> Color {
    CODE_BACKGROUND
}
fn default_code_border_color() -> Color {
    CODE_BORDER_COLOR
}

impl Default for Style {
    fn default() -> Self {
        Style {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            margin: MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            line_gap: LINE_GAP,
            body_size: BODY_SIZE,
            blank_line_gap: BLANK_LINE_GAP,
            code_size: CODE_SIZE,
            code_line_gap: CODE_LINE_GAP,
            code_padding_x: CODE_PADDING_X,
            code_padding_y: CODE_PADDING_Y,
            code_border_width: CODE_BORDER_WIDTH,
            text_color: TEXT_COLOR,
            code_text_color: CODE_TEXT_COLOR,
            code_background: CODE_BACKGROUND,
            code_border_color: CODE_BORDER_COLOR,
        }
    }
}

impl Style {
    /// Horizontal space available to content between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

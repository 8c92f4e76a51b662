use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The three faces a document is set in: body text, headings, code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
    Mono,
}

/// RGB color, components in 0.0..=1.0. Style files spell colors as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        })
    }

    pub fn to_hex(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| D::Error::custom(format!("expected a #rrggbb color, got {s:?}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Drawing surface for a fixed-page-size document.
///
/// Coordinates are PDF points with the origin at the bottom-left corner of
/// the current page; text y is the baseline. Drawing never fails:
/// implementations defer fallible work (serialization) to their own finishing
/// step, which keeps the layout engine total.
pub trait Canvas {
    /// Open a fresh page; subsequent draws land on it.
    fn begin_page(&mut self);

    /// Rendered width of `text` set in `font` at `size` points.
    fn text_width(&self, font: Font, size: f32, text: &str) -> f32;

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color);

    fn draw_rect(&mut self, rect: Rect, fill: Color, border: Color, border_width: f32);
}

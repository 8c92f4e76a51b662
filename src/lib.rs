//! # mdpress
//!
//! Renders GitHub Markdown documents to paginated PDF.
//!
//! The engine works line by line: each input line is classified as a
//! heading, bullet, ordered item, code fence, blank, or paragraph, then laid
//! out with greedy wrapping onto fixed-size pages. Inline markup is kept as
//! literal text; fenced code is set monospaced inside bordered background
//! boxes that chunk across page breaks. Output uses the built-in PDF fonts,
//! so documents need no font embedding and render anywhere.
//!
//! ## Quick Start
//!
//! ```
//! use mdpress::{Style, render_markdown};
//!
//! let markdown = "# Hello\n\nSome body text.\n";
//! let pdf = render_markdown(markdown, Some("Hello"), &Style::default()).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```
//!
//! ## From a GitHub URL
//!
//! ```no_run
//! use mdpress::{Style, fetch_markdown, pdf_file_name, render_markdown, resolve_url};
//!
//! let doc = resolve_url("https://github.com/rust-lang/rust/blob/master/README.md")?;
//! let markdown = fetch_markdown(&doc.raw_url)?;
//! let pdf = render_markdown(&markdown, None, &Style::default())?;
//! std::fs::write(pdf_file_name(&doc.file_name), pdf)?;
//! # Ok::<(), mdpress::Error>(())
//! ```

pub mod canvas;
pub mod classify;
pub mod error;
pub mod fetch;
pub mod github;
pub mod metrics;
pub mod pdf;
pub mod renderer;
pub mod sanitize;
pub mod style;

pub use canvas::{Canvas, Color, Font, Rect};
pub use error::{Error, Result};
pub use fetch::fetch_markdown;
pub use github::{RawDocument, pdf_file_name, resolve_url};
pub use pdf::PdfCanvas;
pub use renderer::{Renderer, render_markdown};
pub use style::Style;

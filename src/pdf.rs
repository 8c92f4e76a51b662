//! lopdf-backed [`Canvas`].
//!
//! Draw calls only append content-stream operations to an in-memory page
//! list; nothing fallible happens until [`PdfCanvas::finish`], which encodes
//! the streams, assembles the page tree, catalog and info dictionary, and
//! serializes the document. Text is set in the base-14 fonts (Helvetica,
//! Helvetica-Bold, Courier) with WinAnsi encoding, so no font programs are
//! embedded.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::canvas::{Canvas, Color, Font, Rect};
use crate::error::Result;
use crate::metrics;

const PRODUCER: &str = concat!("mdpress ", env!("CARGO_PKG_VERSION"));

fn font_name(font: Font) -> &'static str {
    match font {
        Font::Regular => "F1",
        Font::Bold => "F2",
        Font::Mono => "F3",
    }
}

pub struct PdfCanvas {
    page_width: f32,
    page_height: f32,
    title: Option<String>,
    pages: Vec<Vec<Operation>>,
}

impl PdfCanvas {
    pub fn new(page_width: f32, page_height: f32, title: Option<&str>) -> Self {
        PdfCanvas {
            page_width,
            page_height,
            title: title.map(str::to_string),
            pages: Vec::new(),
        }
    }

    fn page_ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Assemble the document and serialize it. A canvas that never saw a
    /// `begin_page` still produces a valid single-page document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let PdfCanvas {
            page_width,
            page_height,
            title,
            mut pages,
        } = self;
        if pages.is_empty() {
            pages.push(Vec::new());
        }

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let helvetica = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let helvetica_bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let courier = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => helvetica,
                "F2" => helvetica_bold,
                "F3" => courier,
            },
        });

        let page_count = pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for operations in pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.0.into(), 0.0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::String(PRODUCER.into(), StringFormat::Literal),
        };
        if let Some(title) = &title {
            info.set(
                "Title",
                Object::String(metrics::encode_text(title), StringFormat::Literal),
            );
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        log::debug!("serialized {} pages, {} bytes", page_count, bytes.len());
        Ok(bytes)
    }
}

impl Canvas for PdfCanvas {
    fn begin_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn text_width(&self, font: Font, size: f32, text: &str) -> f32 {
        metrics::text_width(font, size, text)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color) {
        let name = font_name(font);
        let encoded = metrics::encode_text(text);
        let ops = self.page_ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![name.into(), size.into()]));
        ops.push(Operation::new(
            "rg",
            vec![color.r.into(), color.g.into(), color.b.into()],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn draw_rect(&mut self, rect: Rect, fill: Color, border: Color, border_width: f32) {
        let ops = self.page_ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "rg",
            vec![fill.r.into(), fill.g.into(), fill.b.into()],
        ));
        ops.push(Operation::new(
            "RG",
            vec![border.r.into(), border.g.into(), border.b.into()],
        ));
        ops.push(Operation::new("w", vec![border_width.into()]));
        ops.push(Operation::new(
            "re",
            vec![
                rect.x.into(),
                rect.y.into(),
                rect.width.into(),
                rect.height.into(),
            ],
        ));
        ops.push(Operation::new("B", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }
}

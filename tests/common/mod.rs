use lopdf::Document;
use lopdf::content::{Content, Operation};

use mdpress::Style;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A rendered PDF parsed back for inspection.
pub struct GeneratedPdf {
    pub doc: Document,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = Document::load_mem(&bytes)?;
        Ok(GeneratedPdf { doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// All text runs in page order, decoded through each font's encoding.
    pub fn extract_text(&self) -> String {
        let mut text = String::new();
        for page_num in 1..=self.page_count() {
            if let Ok(page_text) = self.doc.extract_text(&[page_num as u32]) {
                text.push_str(&page_text);
                text.push('\n');
            }
        }
        text
    }

    /// Content-stream operations of every page, first page first.
    pub fn operations(&self) -> Result<Vec<Operation>, Box<dyn std::error::Error>> {
        let mut operations = Vec::new();
        for page_id in self.doc.get_pages().into_values() {
            let content = Content::decode(&self.doc.get_page_content(page_id)?)?;
            operations.extend(content.operations);
        }
        Ok(operations)
    }

    /// Number of rectangle path constructions across all pages.
    pub fn rect_count(&self) -> Result<usize, Box<dyn std::error::Error>> {
        Ok(self
            .operations()?
            .iter()
            .filter(|op| op.operator == "re")
            .count())
    }
}

pub fn render(markdown: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_titled(markdown, "test document")
}

pub fn render_titled(
    markdown: &str,
    title: &str,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes = mdpress::render_markdown(markdown, Some(title), &Style::default())?;
    GeneratedPdf::from_bytes(bytes)
}

pub fn render_styled(
    markdown: &str,
    style: &Style,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes = mdpress::render_markdown(markdown, None, style)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Assert that the PDF's decoded text contains a snippet.
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $pdf.extract_text();
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the exact number of pages.
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

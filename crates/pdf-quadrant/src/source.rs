//! Source page extraction
//!
//! A source buffer is parsed once into a [`SourceDocument`]; its first page
//! is then embedded into a specific output document as a [`SourcePage`].

use crate::layout::Rect;
use crate::render::{create_page_xobject, get_page_box};
use crate::types::{QuadrantError, Result};
use lopdf::{Document, ObjectId};

/// A parsed source document, reduced to its first page
#[derive(Debug, Clone)]
pub struct SourceDocument {
    document: Document,
    first_page: ObjectId,
    page_box: Rect,
}

impl SourceDocument {
    /// Parse a source buffer and locate its first page.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let document =
            Document::load_mem(bytes).map_err(|e| QuadrantError::DocumentParse(e.to_string()))?;

        let first_page = document
            .get_pages()
            .into_values()
            .next()
            .ok_or(QuadrantError::EmptyDocument)?;

        let page_box = get_page_box(&document, first_page)?;

        Ok(Self {
            document,
            first_page,
            page_box,
        })
    }

    /// Intrinsic (width, height) of the first page in points
    pub fn dimensions(&self) -> (f32, f32) {
        (self.page_box.width, self.page_box.height)
    }

    /// Total pages in the source; only the first is ever used
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Embed the first page into `output` as a Form XObject.
    pub fn embed(&self, output: &mut Document) -> Result<SourcePage> {
        let xobject_id =
            create_page_xobject(output, &self.document, self.first_page, &self.page_box)?;
        Ok(SourcePage {
            page_box: self.page_box,
            xobject_id,
        })
    }
}

/// The first page of a source, embedded in one output document
///
/// The XObject ID is only meaningful inside the document it was embedded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePage {
    page_box: Rect,
    xobject_id: ObjectId,
}

impl SourcePage {
    pub fn width(&self) -> f32 {
        self.page_box.width
    }

    pub fn height(&self) -> f32 {
        self.page_box.height
    }

    /// The page's MediaBox in its own coordinate space
    pub fn page_box(&self) -> &Rect {
        &self.page_box
    }

    pub fn xobject_id(&self) -> ObjectId {
        self.xobject_id
    }
}

/// Parse `bytes` and embed its first page into `output`.
pub fn extract(output: &mut Document, bytes: &[u8]) -> Result<SourcePage> {
    SourceDocument::parse(bytes)?.embed(output)
}

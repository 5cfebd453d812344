use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT};

#[derive(Error, Debug)]
pub enum QuadrantError {
    #[error("Document parse error: {0}")]
    DocumentParse(String),
    #[error("Source document has no pages")]
    EmptyDocument,
    #[error("Degenerate source page ({width} x {height} pt)")]
    DegenerateSource { width: f32, height: f32 },
    #[error("Composition failed in {quadrant} quadrant ({name}): {source}")]
    Composition {
        quadrant: Quadrant,
        name: String,
        source: Box<QuadrantError>,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl QuadrantError {
    /// Attach the failing quadrant and its display name to an extraction or fit error.
    pub(crate) fn in_quadrant(self, quadrant: Quadrant, name: &str) -> Self {
        QuadrantError::Composition {
            quadrant,
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying extractor/transform error for a composition failure.
    pub fn root_cause(&self) -> &QuadrantError {
        match self {
            QuadrantError::Composition { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuadrantError>;

/// One of the four fixed regions of the output page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Fixed iteration order used everywhere a composition walks the page
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// Name of the XObject resource this quadrant's source is registered under
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "TL",
            Quadrant::TopRight => "TR",
            Quadrant::BottomLeft => "BL",
            Quadrant::BottomRight => "BR",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quadrant::TopLeft => "top-left",
            Quadrant::TopRight => "top-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::BottomRight => "bottom-right",
        };
        f.write_str(label)
    }
}

/// Supported output paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// Page dimensions (width, height) in points, portrait
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => A4_DIMENSIONS_PT,
            PaperSize::Letter => LETTER_DIMENSIONS_PT,
        }
    }

    /// Lowercase label used in artifact file names
    pub fn label(self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::Letter => "letter",
        }
    }
}

/// A source document bound to a quadrant
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAssignment {
    bytes: Arc<[u8]>,
    name: String,
}

impl SlotAssignment {
    pub fn new(bytes: impl Into<Arc<[u8]>>, name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            name: name.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the buffer, for moving into blocking tasks
    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable snapshot of the paper size and all four slots
///
/// Every quadrant always has an entry; unassigned ones are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositionRequest {
    paper_size: PaperSize,
    slots: [Option<SlotAssignment>; 4],
}

impl CompositionRequest {
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            slots: Default::default(),
        }
    }

    /// Bind a source document to a quadrant, replacing any previous binding
    pub fn with_slot(mut self, quadrant: Quadrant, assignment: SlotAssignment) -> Self {
        self.slots[quadrant.index()] = Some(assignment);
        self
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    pub fn slot(&self, quadrant: Quadrant) -> Option<&SlotAssignment> {
        self.slots[quadrant.index()].as_ref()
    }

    /// All four quadrants in fixed order, with their optional assignment
    pub fn slots(&self) -> impl Iterator<Item = (Quadrant, Option<&SlotAssignment>)> {
        Quadrant::ALL.into_iter().map(|q| (q, self.slot(q)))
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_count() == 0
    }
}

/// A finished, serialized output document
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionResult {
    /// Serialized PDF bytes
    pub bytes: Vec<u8>,
    /// Paper size the page was built with
    pub paper_size: PaperSize,
}

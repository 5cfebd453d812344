pub mod compose;
mod constants;
pub mod dispatch;
pub mod layout;
mod manifest;
mod plan;
pub mod render;
mod source;
mod types;

pub use compose::{compose, read_source, serialize_pdf};
pub use constants::{A4_DIMENSIONS_PT, DEFAULT_FILE_PREFIX, LETTER_DIMENSIONS_PT};
pub use dispatch::{
    ArtifactHandle, DispatchOptions, PrintOutcome, PrintSpooler, SystemSpooler,
    artifact_file_name, render_for_download, render_for_print,
};
pub use layout::{Placement, QuadrantLayout, QuadrantRegion, Rect, contain_fit, quadrant_layout};
pub use manifest::SheetManifest;
pub use plan::{CompositionPlan, PlannedSource, QuadrantPlan, plan_composition};
pub use source::{SourceDocument, SourcePage, extract};
pub use types::*;

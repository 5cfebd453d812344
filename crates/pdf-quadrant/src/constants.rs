//! Shared constants for quadrant composition
//!
//! This module centralizes the fixed page sizes and naming constants used
//! throughout the composition and dispatch process.

// =============================================================================
// Paper Sizes
// =============================================================================

/// A4 page dimensions in whole points (210mm × 297mm)
pub const A4_DIMENSIONS_PT: (f32, f32) = (595.0, 842.0);

/// US Letter page dimensions in points (8.5" × 11")
pub const LETTER_DIMENSIONS_PT: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Output Document
// =============================================================================

/// PDF version written into composed documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Fill color painted under every quadrant (DeviceRGB white)
pub const BACKGROUND_RGB: (f32, f32, f32) = (1.0, 1.0, 1.0);

/// Upper bound on `/Parent` hops when resolving inherited page attributes
pub const MAX_INHERITANCE_DEPTH: usize = 32;

// =============================================================================
// Artifacts
// =============================================================================

/// Default file name prefix for downloaded artifacts
pub const DEFAULT_FILE_PREFIX: &str = "papersave";

/// Extension of every produced artifact
pub const ARTIFACT_EXTENSION: &str = "pdf";

/// Default system print command
pub const DEFAULT_PRINT_COMMAND: &str = "lp";

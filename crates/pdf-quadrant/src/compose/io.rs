//! Document I/O operations for composition

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Read a source file into a slot assignment named after the file
pub async fn read_source(path: impl AsRef<Path>) -> Result<SlotAssignment> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SlotAssignment::new(bytes, name))
}

/// Serialize a finished document to bytes
pub fn serialize_pdf(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

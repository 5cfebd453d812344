//! Sheet rendering for composition

use crate::layout::{contain_fit, quadrant_layout};
use crate::render::{
    background_fill_command, finish_single_page, new_output_document, placement_command,
};
use crate::source::SourceDocument;
use crate::types::*;
use lopdf::{Dictionary, Document, Object};

/// A quadrant with its parsed source, if one was assigned
pub(crate) struct ParsedSlot {
    pub quadrant: Quadrant,
    /// Display name and parsed document
    pub source: Option<(String, SourceDocument)>,
}

/// Build the single output page.
///
/// The returned document is owned by the caller alone; every draw goes
/// through this function, one quadrant at a time.
pub(crate) fn build_sheet(paper_size: PaperSize, slots: &[ParsedSlot]) -> Result<Document> {
    let (width_pt, height_pt) = paper_size.dimensions_pt();
    let layout = quadrant_layout(width_pt, height_pt);

    let (mut output, pages_tree_id) = new_output_document();
    let mut content_ops = Vec::with_capacity(slots.len());
    let mut xobjects = Dictionary::new();

    for slot in slots {
        let region = layout.get(slot.quadrant);

        // Fill then embed, as one group per quadrant
        let mut ops = background_fill_command(&region);

        if let Some((name, source)) = &slot.source {
            let (src_width, src_height) = source.dimensions();
            let placement = contain_fit(src_width, src_height, &region)
                .map_err(|e| e.in_quadrant(slot.quadrant, name))?;
            let page = source
                .embed(&mut output)
                .map_err(|e| e.in_quadrant(slot.quadrant, name))?;

            let xobject_name = slot.quadrant.resource_name();
            xobjects.set(xobject_name, Object::Reference(page.xobject_id()));
            ops.push_str(&placement_command(xobject_name, &placement, page.page_box()));

            log::debug!(
                "Placed {} in {} quadrant at ({}, {}) scale {}",
                name,
                slot.quadrant,
                placement.draw_x,
                placement.draw_y,
                placement.scale
            );
        }

        content_ops.push(ops);
    }

    finish_single_page(
        &mut output,
        pages_tree_id,
        width_pt,
        height_pt,
        content_ops.join(""),
        xobjects,
    );

    Ok(output)
}

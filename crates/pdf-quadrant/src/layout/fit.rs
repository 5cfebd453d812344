//! Content placement within quadrant regions
//!
//! Source pages are placed with a contain-fit: one uniform scale factor,
//! the largest that keeps the page inside the region on both axes, then
//! centered. Nothing is cropped and the aspect ratio is preserved.

use crate::types::{QuadrantError, Result};

use super::{Placement, QuadrantRegion};

/// Calculate the placement of a source page inside a region.
///
/// The scale is not clamped to 1.0, so a page smaller than its region is
/// enlarged until one axis meets the region edge.
///
/// # Arguments
/// * `source_width` - Intrinsic width of the source page in points
/// * `source_height` - Intrinsic height of the source page in points
/// * `region` - The quadrant region to fit into
pub fn contain_fit(
    source_width: f32,
    source_height: f32,
    region: &QuadrantRegion,
) -> Result<Placement> {
    let degenerate = || QuadrantError::DegenerateSource {
        width: source_width,
        height: source_height,
    };

    if !is_drawable(source_width) || !is_drawable(source_height) {
        return Err(degenerate());
    }

    let scale_w = region.width / source_width;
    let scale_h = region.height / source_height;
    let scale = scale_w.min(scale_h);

    let draw_width = source_width * scale;
    let draw_height = source_height * scale;

    let placement = Placement {
        draw_x: region.x + (region.width - draw_width) / 2.0,
        draw_y: region.y + (region.height - draw_height) / 2.0,
        scale,
        draw_width,
        draw_height,
    };

    // Tiny page boxes overflow the scale; the operators would not be valid PDF
    let values = [placement.scale, placement.draw_x, placement.draw_y];
    if !values.iter().all(|v| v.is_finite()) {
        return Err(degenerate());
    }

    Ok(placement)
}

fn is_drawable(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}

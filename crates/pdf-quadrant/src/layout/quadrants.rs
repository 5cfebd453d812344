//! Quadrant region calculation

use super::{QuadrantLayout, Rect};

/// Partition a page into its four quadrant regions.
///
/// Both dimensions are halved; the top row sits at `height / 2` because the
/// page origin is the bottom-left corner.
///
/// # Arguments
/// * `width_pt` - Page width in points
/// * `height_pt` - Page height in points
pub fn quadrant_layout(width_pt: f32, height_pt: f32) -> QuadrantLayout {
    let half_w = width_pt / 2.0;
    let half_h = height_pt / 2.0;

    let layout = QuadrantLayout::from_regions([
        Rect::new(0.0, half_h, half_w, half_h),
        Rect::new(half_w, half_h, half_w, half_h),
        Rect::new(0.0, 0.0, half_w, half_h),
        Rect::new(half_w, 0.0, half_w, half_h),
    ]);

    let page_area = width_pt * height_pt;
    debug_assert!((layout.total_area() - page_area).abs() <= page_area * f32::EPSILON * 4.0);
    layout
}

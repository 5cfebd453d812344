//! Layout data types for quadrant composition
//!
//! These types represent the intermediate geometry between resolving the
//! paper size and writing draw operations into the output page.

use crate::types::Quadrant;

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the interiors of two rectangles overlap (shared edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Region of the output page assigned to one quadrant
pub type QuadrantRegion = Rect;

/// The four regions of one output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantLayout {
    regions: [QuadrantRegion; 4],
}

impl QuadrantLayout {
    pub(crate) fn from_regions(regions: [QuadrantRegion; 4]) -> Self {
        Self { regions }
    }

    pub fn get(&self, quadrant: Quadrant) -> QuadrantRegion {
        self.regions[quadrant.index()]
    }

    /// Regions in fixed quadrant order
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, QuadrantRegion)> + '_ {
        Quadrant::ALL.into_iter().map(|q| (q, self.get(q)))
    }

    pub fn total_area(&self) -> f32 {
        self.regions.iter().map(Rect::area).sum()
    }
}

/// Where and how large a source page is drawn inside its region
///
/// `draw_x`/`draw_y` is the bottom-left corner of the scaled page box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub draw_x: f32,
    pub draw_y: f32,
    /// Uniform scale factor applied to both axes
    pub scale: f32,
    pub draw_width: f32,
    pub draw_height: f32,
}

impl Placement {
    /// The scaled page box on the output page
    pub fn rect(&self) -> Rect {
        Rect::new(self.draw_x, self.draw_y, self.draw_width, self.draw_height)
    }
}

use crate::compose::parse_sources;
use crate::layout::{Placement, QuadrantRegion, contain_fit, quadrant_layout};
use crate::types::*;

/// Placement of one assigned source, as it would be composed
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSource {
    /// Display name of the slot assignment
    pub name: String,
    /// Intrinsic page width in points
    pub width: f32,
    /// Intrinsic page height in points
    pub height: f32,
    /// Pages in the source document (only the first is placed)
    pub page_count: usize,
    pub placement: Placement,
}

/// One quadrant of a planned composition
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantPlan {
    pub quadrant: Quadrant,
    pub region: QuadrantRegion,
    /// None = blank quadrant
    pub source: Option<PlannedSource>,
}

/// Geometry of a composition, computed without writing a document
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionPlan {
    pub paper_size: PaperSize,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Quadrants in fixed order
    pub quadrants: Vec<QuadrantPlan>,
}

impl CompositionPlan {
    pub fn assigned_count(&self) -> usize {
        self.quadrants.iter().filter(|q| q.source.is_some()).count()
    }
}

/// Calculate the placement of every assigned source.
///
/// Fails the same way `compose` does, so a plan that succeeds will compose.
pub async fn plan_composition(request: &CompositionRequest) -> Result<CompositionPlan> {
    let paper_size = request.paper_size();
    let (page_width_pt, page_height_pt) = paper_size.dimensions_pt();
    let layout = quadrant_layout(page_width_pt, page_height_pt);

    let mut quadrants = Vec::with_capacity(Quadrant::ALL.len());
    for slot in parse_sources(request).await? {
        let region = layout.get(slot.quadrant);
        let source = match slot.source {
            Some((name, document)) => {
                let (width, height) = document.dimensions();
                let placement = contain_fit(width, height, &region)
                    .map_err(|e| e.in_quadrant(slot.quadrant, &name))?;
                Some(PlannedSource {
                    name,
                    width,
                    height,
                    page_count: document.page_count(),
                    placement,
                })
            }
            None => None,
        };
        quadrants.push(QuadrantPlan {
            quadrant: slot.quadrant,
            region,
            source,
        });
    }

    Ok(CompositionPlan {
        paper_size,
        page_width_pt,
        page_height_pt,
        quadrants,
    })
}

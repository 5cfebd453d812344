//! Quadrant composition - placing up to four sources on one page
//!
//! This module orchestrates the composition process:
//! 1. Parse the assigned sources (concurrently, off the async threads)
//! 2. Resolve the paper size and quadrant regions
//! 3. Fill, fit and embed each quadrant in fixed order
//! 4. Serialize the output document

mod io;
mod sheet;

pub use io::{read_source, serialize_pdf};

pub(crate) use sheet::ParsedSlot;

use crate::source::SourceDocument;
use crate::types::*;
use sheet::build_sheet;

/// Compose one output page from a request.
///
/// Fails with [`QuadrantError::Composition`] carrying the first failing
/// quadrant (in fixed quadrant order); no bytes are produced in that case.
pub async fn compose(request: &CompositionRequest) -> Result<CompositionResult> {
    let paper_size = request.paper_size();
    let slots = parse_sources(request).await?;

    log::debug!(
        "Composing {} source(s) on {:?}",
        request.assigned_count(),
        paper_size
    );

    let bytes = tokio::task::spawn_blocking(move || {
        let mut output = build_sheet(paper_size, &slots)?;
        serialize_pdf(&mut output)
    })
    .await??;

    Ok(CompositionResult { bytes, paper_size })
}

/// Parse every assigned slot on the blocking pool.
///
/// All parses are started before any is awaited; results are collected in
/// quadrant order so the reported failure is deterministic.
pub(crate) async fn parse_sources(request: &CompositionRequest) -> Result<Vec<ParsedSlot>> {
    let pending: Vec<_> = request
        .slots()
        .map(|(quadrant, slot)| {
            let task = slot.map(|assignment| {
                let bytes = assignment.shared_bytes();
                let name = assignment.name().to_string();
                let handle = tokio::task::spawn_blocking(move || SourceDocument::parse(&bytes));
                (name, handle)
            });
            (quadrant, task)
        })
        .collect();

    let mut parsed = Vec::with_capacity(pending.len());
    for (quadrant, task) in pending {
        let source = match task {
            Some((name, handle)) => {
                let document = handle
                    .await?
                    .map_err(|e| e.in_quadrant(quadrant, &name))?;
                log::debug!("Parsed {} for {} quadrant", name, quadrant);
                Some((name, document))
            }
            None => None,
        };
        parsed.push(ParsedSlot { quadrant, source });
    }

    Ok(parsed)
}

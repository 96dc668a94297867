//! Split-point planning
//!
//! A split point is the zero-based index of the last page of one output
//! document. Point lists are strictly increasing and always end at the last
//! page of the source, so every page lands in exactly one output.

use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::ranges::resolve_selection;

/// Planned division of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitPlan {
    /// Outputs end at these page indices
    AtPoints(Vec<usize>),
    /// Output boundaries depend on serialized size and are found during
    /// assembly, one page at a time
    BySize { max_bytes: u64 },
}

/// Plan split points for a configuration against a page count.
pub fn plan_split(config: &SplitConfig, total_pages: usize) -> Result<SplitPlan, SplitError> {
    config.validate()?;

    if total_pages == 0 {
        return Err(SplitError::InvalidSplitValue(
            "cannot plan a split over zero pages".into(),
        ));
    }

    match config {
        SplitConfig::Pages { expression } => {
            let mut points = resolve_selection(expression, total_pages)?;
            // The final output always terminates at the last page
            if points.last() != Some(&(total_pages - 1)) {
                points.push(total_pages - 1);
            }
            Ok(SplitPlan::AtPoints(points))
        }
        SplitConfig::PageCount { pages_per_output } => Ok(SplitPlan::AtPoints(chunk_points(
            *pages_per_output as usize,
            total_pages,
        ))),
        SplitConfig::DocumentCount { output_count } => {
            let per_output = total_pages.div_ceil(*output_count as usize);
            Ok(SplitPlan::AtPoints(chunk_points(per_output, total_pages)))
        }
        SplitConfig::MaxSize { max_bytes } => Ok(SplitPlan::BySize {
            max_bytes: *max_bytes,
        }),
    }
}

/// Points for fixed-size chunks: every chunk-th page, plus the last page
/// when the count does not divide evenly.
fn chunk_points(chunk: usize, total_pages: usize) -> Vec<usize> {
    let mut points: Vec<usize> = (1..)
        .map(|k| k * chunk - 1)
        .take_while(|&p| p < total_pages)
        .collect();

    if points.last() != Some(&(total_pages - 1)) {
        points.push(total_pages - 1);
    }

    points
}

//! Document assembly
//!
//! Turns a plan into serialized output documents. Outputs are named
//! `{stem}_{n}.pdf` with `n` starting at 1 and counting produced outputs.
//! A failed step discards everything; callers never see partial results.

use crate::config::SplitConfig;
use crate::document::SourceDocument;
use crate::error::SplitError;
use crate::plan::{plan_split, SplitPlan};

/// One result of a split operation. Immutable once produced; the caller
/// owns it from here (download, zip, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Split a source PDF according to the configuration.
///
/// `file_name` is the source's original name; outputs are named after its
/// stem. Returns the outputs in page order, or the first error encountered.
pub fn split_document(
    bytes: &[u8],
    config: &SplitConfig,
    file_name: &str,
) -> Result<Vec<OutputDocument>, SplitError> {
    let source = SourceDocument::load(bytes)?;
    let stem = output_stem(file_name);

    match plan_split(config, source.page_count())? {
        SplitPlan::AtPoints(points) => assemble_at_points(&source, &points, stem),
        SplitPlan::BySize { max_bytes } => assemble_by_size(&source, max_bytes, stem),
    }
}

/// Copy out one segment per split point. `start..=point` is the segment;
/// an empty segment produces no output and does not consume a part index.
fn assemble_at_points(
    source: &SourceDocument,
    points: &[usize],
    stem: &str,
) -> Result<Vec<OutputDocument>, SplitError> {
    let mut outputs = Vec::with_capacity(points.len());
    let mut part_index = 1;
    let mut start = 0usize;

    for &point in points {
        if start > point {
            continue;
        }

        let indices: Vec<usize> = (start..=point).collect();
        let bytes = source.extract_segment(&indices)?;
        outputs.push(OutputDocument {
            name: output_name(stem, part_index),
            bytes,
        });
        part_index += 1;
        start = point + 1;
    }

    Ok(outputs)
}

/// Grow each output a page at a time, measuring the serialized size after
/// every addition. When a page pushes the working set over the cap it is
/// moved into a fresh working set and the previous serialization is emitted.
///
/// A page whose own serialization already exceeds the cap is emitted alone
/// rather than rejected: outputs are never empty and the loop always
/// advances one page per iteration.
fn assemble_by_size(
    source: &SourceDocument,
    max_bytes: u64,
    stem: &str,
) -> Result<Vec<OutputDocument>, SplitError> {
    let mut outputs = Vec::new();
    let mut part_index = 1;
    let mut current: Vec<usize> = Vec::new();
    let mut last_serialized: Vec<u8> = Vec::new();

    for page in 0..source.page_count() {
        current.push(page);
        let serialized = source.extract_segment(&current)?;

        if serialized.len() as u64 > max_bytes && current.len() > 1 {
            outputs.push(OutputDocument {
                name: output_name(stem, part_index),
                bytes: last_serialized,
            });
            part_index += 1;

            current = vec![page];
            last_serialized = source.extract_segment(&current)?;
        } else {
            last_serialized = serialized;
        }
    }

    if !current.is_empty() {
        outputs.push(OutputDocument {
            name: output_name(stem, part_index),
            bytes: last_serialized,
        });
    }

    Ok(outputs)
}

/// File name without its final extension; empty names fall back to a
/// generic stem so outputs always have usable names. Callers bundling
/// outputs use the same stem for the archive name.
pub fn output_stem(file_name: &str) -> &str {
    let trimmed = file_name.trim();
    let stem = match trimmed.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => trimmed,
    };
    if stem.is_empty() {
        "document"
    } else {
        stem
    }
}

fn output_name(stem: &str, part_index: u32) -> String {
    format!("{}_{}.pdf", stem, part_index)
}

//! Source document handle
//!
//! `SourceDocument` is the only seam between the split engine and the PDF
//! library. The planner works on the page count alone; the assembler asks
//! for serialized page segments and never touches lopdf types directly.

use crate::error::SplitError;
use lopdf::Document;
use std::collections::BTreeSet;

/// A parsed source PDF. Never mutated; segment extraction works on a clone.
#[derive(Debug)]
pub struct SourceDocument {
    doc: Document,
    page_count: usize,
}

impl SourceDocument {
    /// Parse source bytes. Unparseable input and zero-page documents are
    /// both rejected as corrupt.
    pub fn load(bytes: &[u8]) -> Result<Self, SplitError> {
        let doc =
            Document::load_mem(bytes).map_err(|e| SplitError::CorruptSource(e.to_string()))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(SplitError::CorruptSource("document has no pages".into()));
        }

        Ok(Self { doc, page_count })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Serialize a new document containing exactly the given pages
    /// (zero-based indices) in source order.
    ///
    /// Works by whitelist: clone the source, delete every page outside the
    /// segment in reverse order so page numbers stay valid, then drop
    /// orphaned objects before serializing.
    pub fn extract_segment(&self, indices: &[usize]) -> Result<Vec<u8>, SplitError> {
        if indices.is_empty() {
            return Err(SplitError::InvalidSplitValue(
                "cannot build an output with no pages".into(),
            ));
        }

        let keep: BTreeSet<u32> = indices.iter().map(|&idx| idx as u32 + 1).collect();

        let mut segment = self.doc.clone();

        let mut to_delete: Vec<u32> = (1..=self.page_count as u32)
            .filter(|page| !keep.contains(page))
            .collect();
        to_delete.reverse();
        for page_num in to_delete {
            segment.delete_pages(&[page_num]);
        }

        segment.prune_objects();
        segment.compress();

        let mut buffer = Vec::new();
        segment
            .save_to(&mut buffer)
            .map_err(|e| SplitError::SerializationFailed(e.to_string()))?;

        Ok(buffer)
    }
}

//! PDF split engine
//!
//! This crate turns one source PDF into an ordered set of named output PDFs,
//! entirely client-side, using lopdf.
//!
//! The pipeline has three stages:
//! - `ranges`: parse a "1,3,5-10" page selection into zero-based indices
//! - `plan`: turn a [`SplitConfig`] into split points (or defer to assembly
//!   for size-capped splitting)
//! - `split`: copy page segments out of the source and serialize each one
//!
//! Callers hand over bytes and a configuration and get back `{name, bytes}`
//! pairs; nothing here touches the filesystem or the network.

pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod inspect;
pub mod plan;
pub mod ranges;
pub mod split;

#[cfg(test)]
pub(crate) mod testutil;

pub use command::{OutputPart, ProcessMetrics, SplitReport, SplitRequest};
pub use config::SplitConfig;
pub use document::SourceDocument;
pub use error::SplitError;
pub use inspect::{inspect, quick_check, DocumentInfo};
pub use plan::{plan_split, SplitPlan};
pub use ranges::resolve_selection;
pub use split::{output_stem, split_document, OutputDocument};

/// Parse PDF bytes and return the page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, SplitError> {
    let doc =
        lopdf::Document::load_mem(bytes).map_err(|e| SplitError::CorruptSource(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

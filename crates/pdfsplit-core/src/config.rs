//! Split configuration
//!
//! A split job is described by exactly one mode. The same JSON shape is
//! accepted from the browser session API and the HTTP API.

use crate::error::SplitError;
use serde::{Deserialize, Serialize};

/// How to divide the source document into outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SplitConfig {
    /// Split after each page named in the expression ("1,3,5-10").
    /// An empty expression splits after every page.
    Pages { expression: String },
    /// Fixed number of pages per output document
    PageCount { pages_per_output: u32 },
    /// Fixed number of output documents
    DocumentCount { output_count: u32 },
    /// Cap each output at a serialized byte size
    MaxSize { max_bytes: u64 },
}

impl SplitConfig {
    /// Reject non-positive numeric parameters.
    ///
    /// Negative and fractional values never get this far: the fields are
    /// unsigned integers, so serde refuses them at the boundary.
    pub fn validate(&self) -> Result<(), SplitError> {
        match self {
            SplitConfig::Pages { .. } => Ok(()),
            SplitConfig::PageCount { pages_per_output: 0 } => Err(SplitError::InvalidSplitValue(
                "pages_per_output must be at least 1".into(),
            )),
            SplitConfig::DocumentCount { output_count: 0 } => Err(SplitError::InvalidSplitValue(
                "output_count must be at least 1".into(),
            )),
            SplitConfig::MaxSize { max_bytes: 0 } => Err(SplitError::InvalidSplitValue(
                "max_bytes must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }
}

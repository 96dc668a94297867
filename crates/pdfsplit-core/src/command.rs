//! Transport shapes shared by the delivery surfaces
//!
//! The browser session and the HTTP API both speak these JSON types, with
//! PDF bytes crossing the boundary base64-encoded.

use crate::config::SplitConfig;
use crate::split::OutputDocument;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A split job as submitted by a caller
#[derive(Debug, Clone, Deserialize)]
pub struct SplitRequest {
    /// Original file name; output names derive from its stem
    pub file_name: String,
    /// Base64-encoded source PDF
    pub data: String,
    pub config: SplitConfig,
}

impl SplitRequest {
    /// Decode the source bytes from their base64 transport form
    pub fn decode_data(&self) -> Result<Vec<u8>, String> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| format!("invalid base64 payload: {}", e))
    }
}

/// One produced output, encoded for transport
#[derive(Debug, Clone, Serialize)]
pub struct OutputPart {
    pub name: String,
    /// Base64-encoded PDF data
    pub data: String,
    pub size_bytes: usize,
}

impl From<&OutputDocument> for OutputPart {
    fn from(output: &OutputDocument) -> Self {
        Self {
            name: output.name.clone(),
            data: STANDARD.encode(&output.bytes),
            size_bytes: output.bytes.len(),
        }
    }
}

/// Result envelope for a completed (or failed) split
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub success: bool,
    pub outputs: Vec<OutputPart>,
    pub error: Option<String>,
    pub metrics: Option<ProcessMetrics>,
}

impl SplitReport {
    pub fn from_outputs(outputs: &[OutputDocument], metrics: ProcessMetrics) -> Self {
        Self {
            success: true,
            outputs: outputs.iter().map(OutputPart::from).collect(),
            error: None,
            metrics: Some(metrics),
        }
    }

    pub fn from_error(message: String) -> Self {
        Self {
            success: false,
            outputs: Vec::new(),
            error: Some(message),
            metrics: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessMetrics {
    pub input_size_bytes: usize,
    pub output_size_bytes: usize,
    pub page_count: u32,
    pub output_count: usize,
}

impl ProcessMetrics {
    pub fn measure(input: &[u8], page_count: u32, outputs: &[OutputDocument]) -> Self {
        Self {
            input_size_bytes: input.len(),
            output_size_bytes: outputs.iter().map(|o| o.bytes.len()).sum(),
            page_count,
            output_count: outputs.len(),
        }
    }
}

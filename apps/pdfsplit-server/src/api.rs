//! API handlers for the pdfsplit server
//!
//! Endpoints:
//! - `GET  /health` - liveness
//! - `POST /api/inspect` - validate a document and report its properties
//! - `POST /api/split` - split one document; `?archive=true` bundles the
//!   parts into a zip download
//! - `POST /api/split/batch` - split several documents with one
//!   configuration, one blocking task per file

use std::io::Write;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

use pdfsplit_core::{
    inspect, output_stem, split_document, DocumentInfo, OutputDocument, OutputPart,
    ProcessMetrics, SplitConfig, SplitRequest,
};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "pdfsplit-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Inspect request body
#[derive(Deserialize)]
pub struct InspectApiRequest {
    /// Base64-encoded PDF
    pub data: String,
}

/// Inspect response
#[derive(Serialize, Debug)]
pub struct InspectApiResponse {
    pub success: bool,
    pub info: DocumentInfo,
}

/// Handler: POST /api/inspect
pub async fn handle_inspect(
    Json(req): Json<InspectApiRequest>,
) -> Result<Json<InspectApiResponse>, ServerError> {
    let bytes = decode_payload(&req.data)?;
    let info = inspect(&bytes)?;

    debug!(
        "Inspected document: {} pages, {} bytes",
        info.page_count, info.size_bytes
    );

    Ok(Json(InspectApiResponse {
        success: true,
        info,
    }))
}

/// Query options for the split endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SplitQuery {
    /// Return a zip of the parts instead of a JSON body
    #[serde(default)]
    pub archive: bool,
}

/// Split response (JSON variant)
#[derive(Serialize)]
pub struct SplitApiResponse {
    pub success: bool,
    pub outputs: Vec<OutputPart>,
    pub count: usize,
    pub page_count: u32,
    pub metrics: ProcessMetrics,
}

/// Handler: POST /api/split
pub async fn handle_split(
    State(state): State<AppState>,
    Query(query): Query<SplitQuery>,
    Json(req): Json<SplitRequest>,
) -> Result<Response, ServerError> {
    info!(
        "Split request: file={}, archive={}",
        req.file_name, query.archive
    );
    debug!("Config: {:?}", req.config);

    let bytes = decode_payload(&req.data)?;
    let page_count = pdfsplit_core::get_page_count(&bytes)?;

    let outputs = run_split(&state, req.file_name.clone(), bytes.clone(), req.config).await?;
    info!("Split produced {} outputs", outputs.len());

    if query.archive {
        let archive = bundle_outputs(&outputs)?;
        let file_name = format!("{}_split.zip", output_stem(&req.file_name));

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                ),
            ],
            archive,
        )
            .into_response())
    } else {
        let metrics = ProcessMetrics::measure(&bytes, page_count, &outputs);

        Ok(Json(SplitApiResponse {
            success: true,
            count: outputs.len(),
            outputs: outputs.iter().map(OutputPart::from).collect(),
            page_count,
            metrics,
        })
        .into_response())
    }
}

/// Batch request: several files, one configuration
#[derive(Deserialize)]
pub struct BatchSplitRequest {
    pub files: Vec<BatchFile>,
    pub config: SplitConfig,
}

#[derive(Deserialize)]
pub struct BatchFile {
    pub file_name: String,
    /// Base64-encoded PDF
    pub data: String,
}

/// Per-file outcome; a failed file does not abort the batch
#[derive(Serialize)]
pub struct BatchFileResult {
    pub file_name: String,
    pub success: bool,
    pub outputs: Vec<OutputPart>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct BatchSplitResponse {
    /// True when every file succeeded
    pub success: bool,
    pub results: Vec<BatchFileResult>,
    pub count: usize,
}

/// Handler: POST /api/split/batch
///
/// Files are independent, so each gets its own blocking task and they run
/// concurrently; results come back in input order.
pub async fn handle_split_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchSplitRequest>,
) -> Result<Json<BatchSplitResponse>, ServerError> {
    info!("Batch split request: {} files", req.files.len());

    let mut handles = Vec::with_capacity(req.files.len());
    for file in req.files {
        let config = req.config.clone();
        let file_name = file.file_name.clone();
        let handle = tokio::task::spawn_blocking(move || -> Result<Vec<OutputDocument>, String> {
            let bytes = STANDARD
                .decode(&file.data)
                .map_err(|e| format!("invalid base64 payload: {}", e))?;
            split_document(&bytes, &config, &file.file_name).map_err(|e| e.to_string())
        });
        handles.push((file_name, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (file_name, handle) in handles {
        let outcome = match tokio::time::timeout(state.split_timeout(), handle).await {
            Err(_) => Err(format!("timed out after {}ms", state.timeout_ms)),
            Ok(joined) => joined
                .map_err(|e| format!("split task failed: {}", e))
                .and_then(|r| r),
        };

        results.push(match outcome {
            Ok(outputs) => BatchFileResult {
                file_name,
                success: true,
                outputs: outputs.iter().map(OutputPart::from).collect(),
                error: None,
            },
            Err(message) => BatchFileResult {
                file_name,
                success: false,
                outputs: Vec::new(),
                error: Some(message),
            },
        });
    }

    let success = results.iter().all(|r| r.success);
    let count = results.len();

    Ok(Json(BatchSplitResponse {
        success,
        results,
        count,
    }))
}

/// Run one split on the blocking pool under the configured timeout
async fn run_split(
    state: &AppState,
    file_name: String,
    bytes: Vec<u8>,
    config: SplitConfig,
) -> Result<Vec<OutputDocument>, ServerError> {
    let task = tokio::task::spawn_blocking(move || split_document(&bytes, &config, &file_name));

    let outputs = tokio::time::timeout(state.split_timeout(), task)
        .await
        .map_err(|_| ServerError::Timeout(state.timeout_ms))?
        .map_err(|e| ServerError::Internal(format!("split task failed: {}", e)))??;

    Ok(outputs)
}

/// Bundle outputs into a zip; entry names are the output names, so the
/// archive unpacks to exactly the files the JSON variant reports
fn bundle_outputs(outputs: &[OutputDocument]) -> Result<Vec<u8>, ServerError> {
    let mut buffer = Vec::new();
    {
        let mut archive = zip::ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        for output in outputs {
            archive
                .start_file(output.name.clone(), options)
                .map_err(|e| ServerError::Internal(format!("failed to create zip entry: {}", e)))?;
            archive
                .write_all(&output.bytes)
                .map_err(|e| ServerError::Internal(format!("failed to write zip entry: {}", e)))?;
        }

        archive
            .finish()
            .map_err(|e| ServerError::Internal(format!("failed to finalize zip: {}", e)))?;
    }

    Ok(buffer)
}

fn decode_payload(data: &str) -> Result<Vec<u8>, ServerError> {
    STANDARD
        .decode(data)
        .map_err(|e| ServerError::InvalidRequest(format!("invalid base64 payload: {}", e)))
}

impl AppState {
    pub fn split_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

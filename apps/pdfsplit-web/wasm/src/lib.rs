//! WASM bindings for the PDF split tool
//!
//! Session-based API with all state held in Rust; JavaScript handles DOM
//! events and file I/O only.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { PdfSplitSession } from './pkg/pdfsplit_wasm.js';
//!
//! await init();
//!
//! const session = new PdfSplitSession();
//! session.setProgressCallback((current, total, msg) => updateUI(current, total, msg));
//! const info = session.loadDocument("contract.pdf", bytes);
//! session.setConfig({ mode: "page_count", pages_per_output: 3 });
//! const report = session.execute();
//! for (const part of report.outputs) {
//!     downloadBase64(part.name, part.data);
//! }
//! ```

pub mod page_info;
pub mod session;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use page_info::{PageInfo, PageOrientation};
pub use session::PdfSplitSession;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Quick structural check for a PDF file, suitable for running on drop
#[wasm_bindgen]
pub fn quick_validate(bytes: &[u8]) -> Result<(), JsValue> {
    pdfsplit_core::quick_check(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get detailed PDF info without creating a session
#[wasm_bindgen]
pub fn get_pdf_info(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = pdfsplit_core::inspect(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&info)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Get page count from PDF bytes (convenience function)
#[wasm_bindgen]
pub fn get_page_count(bytes: &[u8]) -> Result<u32, JsValue> {
    pdfsplit_core::get_page_count(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format bytes as a human-readable string for the file list
#[wasm_bindgen]
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

//! Stateful split session
//!
//! Holds the loaded document and the active configuration in Rust;
//! JavaScript only wires DOM events to these methods and turns the returned
//! parts into downloads.

use crate::page_info::PageInfo;
use lopdf::Document;
use pdfsplit_core::{
    inspect, plan_split, resolve_selection, split_document, DocumentInfo, ProcessMetrics,
    SplitConfig, SplitError, SplitPlan, SplitReport,
};
use wasm_bindgen::prelude::*;

/// The loaded source document with everything the UI asks about
struct DocumentEntry {
    name: String,
    bytes: Vec<u8>,
    document: Document,
    info: DocumentInfo,
}

/// A split session: one document, one configuration, one execution
#[wasm_bindgen]
pub struct PdfSplitSession {
    document: Option<DocumentEntry>,
    config: SplitConfig,
    progress_callback: Option<js_sys::Function>,
}

impl Default for PdfSplitSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PdfSplitSession {
    /// Create an empty session. The default configuration splits after
    /// every page.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            document: None,
            config: SplitConfig::Pages {
                expression: String::new(),
            },
            progress_callback: None,
        }
    }

    /// Set a progress callback: (current: number, total: number, message: string) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    /// Load the source document, replacing any previous one.
    /// Returns document info as a JS object.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let info = self
            .load_document_internal(name, bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Drop the loaded document and its page selection state
    #[wasm_bindgen(js_name = clearDocument)]
    pub fn clear_document(&mut self) {
        self.document = None;
    }

    #[wasm_bindgen(js_name = hasDocument)]
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, |d| d.info.page_count)
    }

    /// Set the split configuration from a JS object like
    /// `{mode: "page_count", pages_per_output: 3}`
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: SplitConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;

        self.set_config_internal(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The active configuration as a JS object
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.config)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// How many outputs the current plan produces, or undefined for
    /// size-capped splitting where the count is only known after execution
    #[wasm_bindgen(js_name = plannedOutputCount)]
    pub fn planned_output_count(&self) -> Option<u32> {
        let document = self.document.as_ref()?;
        match plan_split(&self.config, document.info.page_count as usize) {
            Ok(SplitPlan::AtPoints(points)) => Some(points.len() as u32),
            _ => None,
        }
    }

    /// Metadata for one page (dimensions, rotation, orientation)
    #[wasm_bindgen(js_name = getPageInfo)]
    pub fn get_page_info(&self, page_num: u32) -> Result<JsValue, JsValue> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No document loaded"))?;

        let info = PageInfo::from_document(&document.document, page_num)
            .map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Document-level info captured at load time
    #[wasm_bindgen(js_name = getDocumentInfo)]
    pub fn get_document_info(&self) -> Result<JsValue, JsValue> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No document loaded"))?;

        serde_wasm_bindgen::to_value(&document.info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = canExecute)]
    pub fn can_execute(&self) -> bool {
        self.document.is_some()
    }

    /// Run the split. Returns a report object whose `outputs` array holds
    /// `{name, data, size_bytes}` entries with base64-encoded bytes.
    pub fn execute(&self) -> Result<JsValue, JsValue> {
        self.report_progress(0, 100, "Starting...");

        let (outputs, metrics) = self
            .execute_internal()
            .map_err(|e| JsValue::from_str(&format!("Split failed: {}", e)))?;

        self.report_progress(90, 100, "Encoding outputs...");
        let report = SplitReport::from_outputs(&outputs, metrics);

        self.report_progress(100, 100, "Complete");

        serde_wasm_bindgen::to_value(&report)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

// Internal, JsValue-free methods; all session logic is testable here
impl PdfSplitSession {
    fn load_document_internal(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> Result<DocumentInfo, SplitError> {
        let info = inspect(bytes)?;

        let document =
            Document::load_mem(bytes).map_err(|e| SplitError::CorruptSource(e.to_string()))?;

        self.document = Some(DocumentEntry {
            name: name.to_string(),
            bytes: bytes.to_vec(),
            document,
            info: info.clone(),
        });

        Ok(info)
    }

    fn set_config_internal(&mut self, config: SplitConfig) -> Result<(), SplitError> {
        config.validate()?;

        // With a document loaded, surface expression problems now instead
        // of at execute time
        if let (SplitConfig::Pages { expression }, Some(document)) = (&config, &self.document) {
            resolve_selection(expression, document.info.page_count as usize)?;
        }

        self.config = config;
        Ok(())
    }

    fn execute_internal(
        &self,
    ) -> Result<(Vec<pdfsplit_core::OutputDocument>, ProcessMetrics), SplitError> {
        let document = self.document.as_ref().ok_or_else(|| {
            SplitError::InvalidSplitValue("no document loaded".into())
        })?;

        self.report_progress(10, 100, "Splitting...");

        let outputs = split_document(&document.bytes, &self.config, &document.name)?;
        let metrics = ProcessMetrics::measure(&document.bytes, document.info.page_count, &outputs);

        Ok((outputs, metrics))
    }

    fn report_progress(&self, current: u32, total: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            let _ = callback.call3(
                &JsValue::null(),
                &JsValue::from(current),
                &JsValue::from(total),
                &JsValue::from_str(message),
            );
        }
    }
}

//! Pre-flight document inspection
//!
//! The UI runs these before committing to a split: a cheap structural check
//! on drop, a full parse with metadata once the file is selected.

use crate::error::SplitError;
use lopdf::Document;
use serde::Serialize;

/// Information about a source document, extracted during validation
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentInfo {
    pub page_count: u32,
    /// PDF version from the header, e.g. "1.7"
    pub version: String,
    pub encrypted: bool,
    pub size_bytes: usize,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Cheap structural check without parsing: header magic plus an EOF marker
/// near the end of the file.
pub fn quick_check(bytes: &[u8]) -> Result<(), SplitError> {
    if bytes.len() < 8 {
        return Err(SplitError::CorruptSource(
            "file too small to be a PDF".into(),
        ));
    }
    if !bytes.starts_with(b"%PDF-") {
        return Err(SplitError::CorruptSource(
            "missing %PDF- header".into(),
        ));
    }

    let tail_len = bytes.len().min(1024);
    let tail = &bytes[bytes.len() - tail_len..];
    if !tail.windows(5).any(|w| w == b"%%EOF") {
        return Err(SplitError::CorruptSource(
            "truncated file (no %%EOF marker)".into(),
        ));
    }

    Ok(())
}

/// Fully parse the document and report its properties. Fails on anything
/// the split engine would also refuse to load.
pub fn inspect(bytes: &[u8]) -> Result<DocumentInfo, SplitError> {
    quick_check(bytes)?;

    let doc = Document::load_mem(bytes).map_err(|e| SplitError::CorruptSource(e.to_string()))?;

    let page_count = doc.get_pages().len() as u32;
    if page_count == 0 {
        return Err(SplitError::CorruptSource("document has no pages".into()));
    }

    Ok(DocumentInfo {
        page_count,
        version: header_version(bytes),
        encrypted: doc.is_encrypted(),
        size_bytes: bytes.len(),
        title: info_entry(&doc, b"Title"),
        author: info_entry(&doc, b"Author"),
    })
}

/// Version digits from the "%PDF-x.y" header
fn header_version(bytes: &[u8]) -> String {
    bytes
        .get(5..8)
        .and_then(|v| std::str::from_utf8(v).ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "1.4".to_string())
}

/// A string entry from the trailer's Info dictionary, if present
fn info_entry(doc: &Document, key: &[u8]) -> Option<String> {
    let info_id = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let dict = doc.objects.get(&info_id)?.as_dict().ok()?;
    let raw = dict.get(key).ok()?.as_str().ok()?;

    let decoded = String::from_utf8_lossy(raw);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.into_owned())
    }
}

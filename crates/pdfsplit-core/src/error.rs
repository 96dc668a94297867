use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid page expression: {0}")]
    MalformedExpression(String),

    #[error("Page {page} is out of range (document has {page_count} pages)")]
    OutOfRange { page: u32, page_count: u32 },

    #[error("Invalid split value: {0}")]
    InvalidSplitValue(String),

    #[error("Failed to parse PDF: {0}")]
    CorruptSource(String),

    #[error("Failed to produce output PDF: {0}")]
    SerializationFailed(String),
}

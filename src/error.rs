//! Structured error types for sheetpager.
//!
//! Every fallible operation returns a typed error; the upload flow surfaces
//! these as a recoverable status instead of an uncaught fault.

/// All errors that can occur while parsing, caching, or rendering a dataset.
#[derive(Debug, thiserror::Error)]
pub enum SheetpagerError {
    /// JSON encode/decode error for the persisted cache.
    #[error("Cache serialization: {0}")]
    Json(#[from] serde_json::Error),

    /// The external row parser rejected the uploaded file.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The persisted cache could not be read or written.
    #[error("Cache storage: {0}")]
    Storage(String),

    /// A required DOM element could not be created or attached.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetpagerError>;

impl From<String> for SheetpagerError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SheetpagerError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SheetpagerError> for wasm_bindgen::JsValue {
    fn from(e: SheetpagerError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

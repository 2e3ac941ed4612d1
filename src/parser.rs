//! The binary-workbook parser as an external capability.
//!
//! Converting `.xlsx`/`.xls` bytes into row objects is a collaborator's job
//! (a SheetJS-style library on the host page). This crate only defines the
//! seam: `parse(bytes) -> Result<Dataset>`, so callers handle failure as an
//! error state instead of an uncaught fault.

use crate::dataset::Dataset;
use crate::error::{Result, SheetpagerError};

/// Converts raw uploaded bytes into an ordered sequence of rows, using the
/// converter's first-row-is-header convention.
pub trait RowsParser {
    fn parse(&self, bytes: &[u8]) -> Result<Dataset>;
}

/// Parser for bytes that are already a JSON array of flat row objects.
///
/// Backs the CLI and tests; also usable when the host converts the workbook
/// itself and hands over JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl RowsParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<Dataset> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SheetpagerError::Parse(format!("not UTF-8 JSON: {e}")))?;
        Dataset::from_json(text)
    }
}

/// Host-supplied converter: a JavaScript function taking a `Uint8Array` of
/// workbook bytes and returning an array of flat row objects (first sheet,
/// first row as header — the converter's defaults, adopted as-is).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct JsParser {
    convert: js_sys::Function,
}

#[cfg(target_arch = "wasm32")]
impl JsParser {
    #[must_use]
    pub fn new(convert: js_sys::Function) -> Self {
        Self { convert }
    }
}

#[cfg(target_arch = "wasm32")]
impl RowsParser for JsParser {
    fn parse(&self, bytes: &[u8]) -> Result<Dataset> {
        let payload = js_sys::Uint8Array::from(bytes);
        let rows = self
            .convert
            .call1(&wasm_bindgen::JsValue::NULL, &payload)
            .map_err(|e| {
                SheetpagerError::Parse(
                    e.as_string()
                        .unwrap_or_else(|| "converter threw".to_string()),
                )
            })?;
        serde_wasm_bindgen::from_value(rows)
            .map_err(|e| SheetpagerError::Parse(format!("converter output: {e}")))
    }
}

//! sheetpager - spreadsheet upload + paginated table for the web
//!
//! Parses a user-uploaded spreadsheet through a host-supplied converter,
//! caches the rows in browser local storage, and renders them 100 at a time
//! in an HTML table with Previous/Next navigation:
//! - Restores the cached dataset on mount (survives page reloads)
//! - Columns derived from the first visible row's key order
//! - Parse and cache failures surfaced as recoverable status, never faults
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { SheetPager } from 'sheetpager';
//! await init();
//! const pager = new SheetPager(document.getElementById('upload'));
//! pager.setParser((bytes) => {
//!   const wb = XLSX.read(bytes, { type: 'array' });
//!   return XLSX.utils.sheet_to_json(wb.Sheets[wb.SheetNames[0]]);
//! });
//! ```

// Core state and projection
pub mod controller;
pub mod dataset;
pub mod error;
pub mod pagination;
pub mod parser;
pub mod storage;
pub mod table;

// Browser component (DOM + event wiring)
#[cfg(target_arch = "wasm32")]
pub mod view;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use view::SheetPager;

pub use controller::UploadController;
pub use dataset::{CellValue, Dataset, Row};

/// Decode a cached dataset (a JSON array of flat row objects) and return it
/// as a `JsValue` array, for hosts that want the rows without the component.
///
/// # Errors
/// Returns an error if the JSON is not a valid row array.
#[wasm_bindgen]
pub fn decode_dataset(json: &str) -> Result<JsValue, JsValue> {
    let dataset = Dataset::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&dataset)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

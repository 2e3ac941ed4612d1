//! Table projection: pure column derivation plus the renderers built on it.
//!
//! Rendering is a side-effect-free function of `(visible rows)` — no state,
//! no memoization (at most one page of rows is ever rendered). Columns come
//! from the key order of the first visible row; ragged rows degrade rather
//! than error: missing columns render empty, extra keys are ignored.

use crate::dataset::Row;

/// Column names for a page: the key order of the first row of the slice.
/// An empty slice has no columns, which gates table rendering entirely.
#[must_use]
pub fn derive_columns(visible: &[Row]) -> Vec<String> {
    visible
        .first()
        .map(|row| row.keys().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Render a page as an aligned plain-text table (CLI and debugging output).
/// Returns `None` for an empty slice, mirroring the hidden-table gate.
#[must_use]
pub fn render_text(visible: &[Row]) -> Option<String> {
    let columns = derive_columns(visible);
    if columns.is_empty() {
        return None;
    }

    let mut widths: Vec<usize> = columns.iter().map(String::len).collect();
    let mut body: Vec<Vec<String>> = Vec::with_capacity(visible.len());
    for row in visible {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| row.get(col).map(|v| v.display()).unwrap_or_default())
            .collect();
        for (width, cell) in widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.len());
        }
        body.push(cells);
    }

    let format_line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<w$}", w = *width))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let header: Vec<String> = columns;
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut lines = vec![format_line(&header), format_line(&separator)];
    lines.extend(body.iter().map(|cells| format_line(cells)));
    Some(lines.join("\n"))
}

/// DOM `<table>` builder for the current page.
#[cfg(target_arch = "wasm32")]
pub(crate) mod dom {
    use super::derive_columns;
    use crate::dataset::Row;
    use crate::error::{Result, SheetpagerError};
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element};

    fn create(document: &Document, tag: &str) -> Result<Element> {
        document
            .create_element(tag)
            .map_err(|_| SheetpagerError::Dom(format!("create <{tag}> failed")))
    }

    /// Build a `<table>` for the visible rows, or `None` when the slice is
    /// empty (the table element is not rendered at all).
    pub(crate) fn build_table(document: &Document, visible: &[Row]) -> Result<Option<Element>> {
        let columns = derive_columns(visible);
        if columns.is_empty() {
            return Ok(None);
        }

        let table = create(document, "table")?;
        table.set_class_name("sheetpager-table");
        if let Some(el) = table.dyn_ref::<web_sys::HtmlElement>() {
            let _ = el.style().set_property("border-collapse", "collapse");
        }

        let thead = create(document, "thead")?;
        let header_row = create(document, "tr")?;
        for name in &columns {
            let th = create(document, "th")?;
            th.set_text_content(Some(name));
            header_row
                .append_child(&th)
                .map_err(|_| SheetpagerError::Dom("append th".to_string()))?;
        }
        thead
            .append_child(&header_row)
            .map_err(|_| SheetpagerError::Dom("append header row".to_string()))?;
        table
            .append_child(&thead)
            .map_err(|_| SheetpagerError::Dom("append thead".to_string()))?;

        let tbody = create(document, "tbody")?;
        for row in visible {
            let tr = create(document, "tr")?;
            for name in &columns {
                let td = create(document, "td")?;
                let text = row.get(name).map(|v| v.display()).unwrap_or_default();
                td.set_text_content(Some(&text));
                tr.append_child(&td)
                    .map_err(|_| SheetpagerError::Dom("append td".to_string()))?;
            }
            tbody
                .append_child(&tr)
                .map_err(|_| SheetpagerError::Dom("append row".to_string()))?;
        }
        table
            .append_child(&tbody)
            .map_err(|_| SheetpagerError::Dom("append tbody".to_string()))?;

        Ok(Some(table))
    }
}

//! The wasm-exported `SheetPager` component.
//!
//! Builds the upload surface (file input, paginated table, Previous/Next
//! controls, outbound link) inside a host container and wires event closures
//! when the component is created — no manual JavaScript wiring required
//! beyond supplying the workbook converter via [`SheetPager::set_parser`].
//!
//! State lives in an [`UploadController`] behind `Rc<RefCell<..>>` so the
//! event closures and the async file read can all reach it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlDivElement, HtmlElement,
    HtmlInputElement,
};

use crate::controller::UploadController;
use crate::dataset::Dataset;
use crate::error::{Result, SheetpagerError};
use crate::parser::JsParser;
use crate::storage::LocalStore;
use crate::table;

/// Route for the static outbound link next to the pagination controls.
const OUTBOUND_ROUTE: &str = "/url";

/// Shared state reachable from event closures.
pub(crate) struct SharedState {
    controller: UploadController<LocalStore>,
    parser: Option<JsParser>,
}

/// DOM handles for the component surface. Kept behind `Rc` so render calls
/// from closures can reach every element.
struct Dom {
    document: Document,
    file_input: HtmlInputElement,
    status: HtmlDivElement,
    table_section: HtmlDivElement,
    table_host: HtmlDivElement,
    prev_button: HtmlButtonElement,
    next_button: HtmlButtonElement,
    page_label: HtmlElement,
}

fn dom_err(what: &str) -> SheetpagerError {
    SheetpagerError::Dom(what.to_string())
}

fn create_el<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)
        .map_err(|_| dom_err("create element failed"))?
        .dyn_into::<T>()
        .map_err(|_| dom_err("unexpected element type"))
}

fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|_| dom_err("append child failed"))
}

/// The spreadsheet upload + paginated table component exported to JavaScript.
#[wasm_bindgen]
pub struct SheetPager {
    state: Rc<RefCell<SharedState>>,
    dom: Rc<Dom>,
    #[allow(dead_code)] // Kept alive for the lifetime of the DOM listeners
    closures: Vec<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl SheetPager {
    /// Mount the component into `container`.
    ///
    /// Reads the persisted cache once: a valid non-empty cached dataset is
    /// restored and shown immediately. A corrupt cached value is logged and
    /// skipped rather than left as an uncaught fault.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> std::result::Result<SheetPager, JsValue> {
        console_error_panic_hook::set_once();

        let store = LocalStore::open()?;
        let mut controller = UploadController::new(store);
        match controller.restore() {
            Ok(true) => {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "sheetpager: restored {} cached rows",
                    controller.dataset().len()
                )));
            }
            Ok(false) => {}
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "sheetpager: ignoring corrupt cached dataset: {e}"
                )));
            }
        }

        let state = Rc::new(RefCell::new(SharedState {
            controller,
            parser: None,
        }));

        let dom = Rc::new(Self::build_dom(&container)?);

        let mut closures: Vec<Closure<dyn FnMut(web_sys::Event)>> = Vec::new();

        // File selection: read the file asynchronously, then parse and
        // persist. No guard against overlapping uploads — last completed
        // read wins, matching single-writer semantics in this event loop.
        {
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let Some(file) = dom_ref.file_input.files().and_then(|list| list.get(0)) else {
                    return; // no file selected: no-op, no surfaced error
                };
                let state = state.clone();
                let dom_ref = dom_ref.clone();
                spawn_local(async move {
                    let bytes = match JsFuture::from(file.array_buffer()).await {
                        Ok(buffer) => js_sys::Uint8Array::new(&buffer).to_vec(),
                        Err(_) => {
                            Self::show_status(&dom_ref, "Could not read the selected file.");
                            return;
                        }
                    };
                    Self::handle_upload(&state, &dom_ref, &bytes);
                });
            }) as Box<dyn FnMut(web_sys::Event)>);
            dom.file_input
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
                .map_err(|_| dom_err("attach change listener"))?;
            closures.push(closure);
        }

        // Previous page
        {
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let changed = state.borrow_mut().controller.previous_page();
                if changed {
                    Self::render(&state, &dom_ref);
                }
            }) as Box<dyn FnMut(web_sys::Event)>);
            dom.prev_button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|_| dom_err("attach prev listener"))?;
            closures.push(closure);
        }

        // Next page
        {
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let changed = state.borrow_mut().controller.next_page();
                if changed {
                    Self::render(&state, &dom_ref);
                }
            }) as Box<dyn FnMut(web_sys::Event)>);
            dom.next_button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|_| dom_err("attach next listener"))?;
            closures.push(closure);
        }

        let view = SheetPager {
            state,
            dom,
            closures,
        };
        Self::render(&view.state, &view.dom);
        Ok(view)
    }

    /// Supply the workbook converter: a function taking a `Uint8Array` of
    /// file bytes and returning an array of flat row objects (e.g. a SheetJS
    /// `read` + `sheet_to_json` shim over the first sheet).
    #[wasm_bindgen(js_name = "setParser")]
    pub fn set_parser(&mut self, convert: js_sys::Function) {
        self.state.borrow_mut().parser = Some(JsParser::new(convert));
    }

    /// Programmatic upload path: parse `data` with the configured converter
    /// and, on success, replace the dataset and cache.
    pub fn load(&mut self, data: &[u8]) -> std::result::Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        let parser = s
            .parser
            .clone()
            .ok_or_else(|| JsValue::from_str("no parser configured"))?;
        s.controller.ingest(&parser, data).map_err(JsValue::from)?;
        drop(s);
        Self::render(&self.state, &self.dom);
        Ok(())
    }

    /// Accept rows the host already converted (an array of flat objects),
    /// bypassing the parser capability.
    #[wasm_bindgen(js_name = "loadRows")]
    pub fn load_rows(&mut self, rows: JsValue) -> std::result::Result<(), JsValue> {
        let dataset: Dataset = serde_wasm_bindgen::from_value(rows)
            .map_err(|e| JsValue::from_str(&format!("invalid rows: {e}")))?;
        self.state
            .borrow_mut()
            .controller
            .replace_dataset(dataset)
            .map_err(JsValue::from)?;
        Self::render(&self.state, &self.dom);
        Ok(())
    }

    /// Current 1-based page number.
    #[wasm_bindgen(js_name = "currentPage", getter)]
    pub fn current_page(&self) -> u32 {
        u32::try_from(self.state.borrow().controller.current_page()).unwrap_or(u32::MAX)
    }

    /// Total number of pages (at least 1).
    #[wasm_bindgen(js_name = "pageCount", getter)]
    pub fn page_count(&self) -> u32 {
        u32::try_from(self.state.borrow().controller.page_count()).unwrap_or(u32::MAX)
    }

    /// Whether the table block is shown.
    #[wasm_bindgen(js_name = "isTableVisible", getter)]
    pub fn is_table_visible(&self) -> bool {
        self.state.borrow().controller.table_visible()
    }
}

impl SheetPager {
    /// Build the component surface:
    ///
    /// ```text
    /// container
    /// ├── label + file input (accept=".xlsx, .xls")
    /// ├── status line (hidden until an error is surfaced)
    /// └── table section (hidden until a dataset is visible)
    ///     ├── table host (the <table> is rebuilt here on every render)
    ///     └── pager: [Previous] [Page N of M] [Next] ... [Api Calls → /url]
    /// ```
    fn build_dom(container: &HtmlElement) -> Result<Dom> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| dom_err("no document"))?;

        let upload_block: HtmlDivElement = create_el(&document, "div")?;
        let label: HtmlElement = create_el(&document, "label")?;
        label.set_text_content(Some("Upload file"));
        let file_input: HtmlInputElement = create_el(&document, "input")?;
        file_input.set_type("file");
        // Advisory filter only; nothing enforces the extension.
        file_input
            .set_attribute("accept", ".xlsx, .xls")
            .map_err(|_| dom_err("set accept"))?;
        append(&upload_block, &label)?;
        append(&upload_block, &file_input)?;

        let status: HtmlDivElement = create_el(&document, "div")?;
        status.set_class_name("sheetpager-status");
        let _ = status.style().set_property("display", "none");

        let table_section: HtmlDivElement = create_el(&document, "div")?;
        let table_host: HtmlDivElement = create_el(&document, "div")?;
        table_host.set_class_name("sheetpager-table-host");

        let pager: HtmlDivElement = create_el(&document, "div")?;
        pager.set_class_name("sheetpager-pager");
        let prev_button: HtmlButtonElement = create_el(&document, "button")?;
        prev_button.set_text_content(Some("Previous"));
        let page_label: HtmlElement = create_el(&document, "span")?;
        let next_button: HtmlButtonElement = create_el(&document, "button")?;
        next_button.set_text_content(Some("Next"));
        append(&pager, &prev_button)?;
        append(&pager, &page_label)?;
        append(&pager, &next_button)?;

        // Static outbound link to a sibling route; an opaque collaborator.
        let link: HtmlAnchorElement = create_el(&document, "a")?;
        link.set_href(OUTBOUND_ROUTE);
        link.set_text_content(Some("Api Calls"));
        append(&pager, &link)?;

        append(&table_section, &table_host)?;
        append(&table_section, &pager)?;

        append(container, &upload_block)?;
        append(container, &status)?;
        append(container, &table_section)?;

        Ok(Dom {
            document,
            file_input,
            status,
            table_section,
            table_host,
            prev_button,
            next_button,
            page_label,
        })
    }

    /// Parse and ingest uploaded bytes; surface failures as a status line
    /// instead of an uncaught fault.
    fn handle_upload(state: &Rc<RefCell<SharedState>>, dom: &Rc<Dom>, bytes: &[u8]) {
        let outcome = {
            let mut s = state.borrow_mut();
            let Some(parser) = s.parser.clone() else {
                Self::show_status(dom, "No workbook converter configured.");
                return;
            };
            s.controller.ingest(&parser, bytes)
        };
        match outcome {
            Ok(()) => {
                Self::clear_status(dom);
                Self::render(state, dom);
                let rows = state.borrow().controller.dataset().len();
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "sheetpager: loaded {rows} rows"
                )));
            }
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("sheetpager: {e}")));
                Self::show_status(dom, &format!("Could not read spreadsheet: {e}"));
            }
        }
    }

    fn show_status(dom: &Dom, message: &str) {
        dom.status.set_text_content(Some(message));
        let _ = dom.status.style().set_property("display", "block");
    }

    fn clear_status(dom: &Dom) {
        dom.status.set_text_content(None);
        let _ = dom.status.style().set_property("display", "none");
    }

    /// Re-project state into the DOM. Stateless with respect to prior
    /// renders: the table is rebuilt from the visible slice every time.
    fn render(state: &Rc<RefCell<SharedState>>, dom: &Dom) {
        let s = state.borrow();
        let controller = &s.controller;

        if !controller.table_visible() {
            let _ = dom.table_section.style().set_property("display", "none");
            return;
        }
        let _ = dom.table_section.style().set_property("display", "block");

        // Rebuild the table from the current page's slice. An empty slice
        // renders no table element at all.
        dom.table_host.set_inner_html("");
        match table::dom::build_table(&dom.document, controller.visible_rows()) {
            Ok(Some(table_el)) => {
                let _ = dom.table_host.append_child(&table_el);
            }
            Ok(None) => {}
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("sheetpager: {e}")));
            }
        }

        dom.page_label.set_text_content(Some(&format!(
            "Page {} of {}",
            controller.current_page(),
            controller.page_count()
        )));
        dom.prev_button.set_disabled(controller.at_first_page());
        dom.next_button.set_disabled(controller.at_last_page());
    }
}

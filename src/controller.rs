//! Upload controller: owns the dataset, the page state, and the table
//! visibility flag, and mediates between the parser capability, the
//! persisted cache, and the rendered projection.
//!
//! This is deliberately DOM-free so the full state machine runs in native
//! tests against a [`MemoryStore`](crate::storage::MemoryStore). The wasm
//! component in [`view`](crate::view) wraps one of these around a
//! `localStorage`-backed store and wires it to events.

use crate::dataset::{Dataset, Row};
use crate::error::Result;
use crate::pagination::{visible_slice, PageState};
use crate::parser::RowsParser;
use crate::storage::DatasetStore;

/// Component state plus its injected storage capability.
#[derive(Debug)]
pub struct UploadController<S: DatasetStore> {
    store: S,
    dataset: Dataset,
    page: PageState,
    table_visible: bool,
}

impl<S: DatasetStore> UploadController<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            dataset: Dataset::new(),
            page: PageState::new(),
            table_visible: false,
        }
    }

    /// Mount-time restore: read the persisted cache once. A present,
    /// non-empty cached dataset becomes the live dataset and shows the
    /// table; the page stays at its default of 1.
    ///
    /// Returns whether a dataset was restored. A corrupt cached value is a
    /// handled error that leaves the state untouched.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(json) = self.store.load()? else {
            return Ok(false);
        };
        let dataset = Dataset::from_json(&json)?;
        if dataset.is_empty() {
            return Ok(false);
        }
        self.dataset = dataset;
        self.table_visible = true;
        Ok(true)
    }

    /// Completion of a successful upload: persist the new dataset
    /// (overwriting any prior cache, even for identical content), replace
    /// the in-memory dataset wholesale, show the table, and go back to
    /// page 1 so the page invariant holds for the new length.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> Result<()> {
        self.store.save(&dataset.to_json()?)?;
        self.dataset = dataset;
        self.table_visible = true;
        self.page.reset();
        Ok(())
    }

    /// Parse uploaded bytes through the injected capability and, on success,
    /// run [`replace_dataset`](Self::replace_dataset). A parse failure
    /// changes no state.
    pub fn ingest(&mut self, parser: &impl RowsParser, bytes: &[u8]) -> Result<()> {
        let dataset = parser.parse(bytes)?;
        self.replace_dataset(dataset)
    }

    /// Advance a page; a no-op on the last page. Returns whether the page
    /// changed (i.e. whether a re-render is needed).
    pub fn next_page(&mut self) -> bool {
        self.page.next(self.dataset.len())
    }

    /// Go back a page; a no-op on page 1.
    pub fn previous_page(&mut self) -> bool {
        self.page.previous()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn table_visible(&self) -> bool {
        self.table_visible
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        crate::pagination::page_count(self.dataset.len(), self.page.records_per_page())
    }

    /// The rows projected onto the current page.
    #[must_use]
    pub fn visible_rows(&self) -> &[Row] {
        visible_slice(
            self.dataset.rows(),
            self.page.current_page(),
            self.page.records_per_page(),
        )
    }

    #[must_use]
    pub fn at_first_page(&self) -> bool {
        self.page.at_first()
    }

    #[must_use]
    pub fn at_last_page(&self) -> bool {
        self.page.at_last(self.dataset.len())
    }

    /// The backing store (for tests asserting on cache contents).
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

//! Upload controller tests
//!
//! Mount-time restore, cache replacement semantics, navigation bounds, and
//! handled failure modes — all against the in-memory store.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use sheetpager::controller::UploadController;
use sheetpager::dataset::{CellValue, Dataset, Row};
use sheetpager::parser::{JsonParser, RowsParser};
use sheetpager::storage::{DatasetStore, MemoryStore};

fn make_dataset(n: usize) -> Dataset {
    let rows: Vec<Row> = (0..n)
        .map(|i| {
            [
                ("Name".to_string(), CellValue::Text(format!("row-{i}"))),
                ("Index".to_string(), CellValue::Number(i as f64)),
            ]
            .into_iter()
            .collect()
        })
        .collect();
    rows.into()
}

#[test]
fn fresh_mount_with_empty_store_shows_nothing() {
    let mut controller = UploadController::new(MemoryStore::new());
    assert!(!controller.restore().unwrap());
    assert!(!controller.table_visible());
    assert!(controller.dataset().is_empty());
    assert_eq!(controller.current_page(), 1);
}

#[test]
fn mount_restores_cached_dataset() {
    let cached = make_dataset(150).to_json().unwrap();
    let mut controller = UploadController::new(MemoryStore::with_cached(cached));

    assert!(controller.restore().unwrap());
    assert!(controller.table_visible());
    assert_eq!(controller.dataset().len(), 150);
    assert_eq!(controller.current_page(), 1, "page starts at default 1");
    assert_eq!(controller.page_count(), 2);
}

#[test]
fn mount_ignores_cached_empty_array() {
    let mut controller = UploadController::new(MemoryStore::with_cached("[]"));
    assert!(!controller.restore().unwrap());
    assert!(!controller.table_visible());
}

#[test]
fn corrupt_cache_is_a_handled_error_that_leaves_state_untouched() {
    let mut controller = UploadController::new(MemoryStore::with_cached("{not json"));
    assert!(controller.restore().is_err());
    assert!(!controller.table_visible());
    assert!(controller.dataset().is_empty());
}

#[test]
fn upload_persists_then_replaces_dataset() {
    let mut controller = UploadController::new(MemoryStore::new());
    controller.replace_dataset(make_dataset(42)).unwrap();

    assert!(controller.table_visible());
    assert_eq!(controller.dataset().len(), 42);
    let cached = controller.store().cached().unwrap();
    assert_eq!(Dataset::from_json(cached).unwrap(), make_dataset(42));
}

#[test]
fn cache_round_trip_survives_a_remount() {
    let mut first = UploadController::new(MemoryStore::new());
    first.replace_dataset(make_dataset(7)).unwrap();
    let cached = first.store().cached().unwrap().to_string();

    // Simulate a page reload: a fresh controller over the same store value.
    let mut second = UploadController::new(MemoryStore::with_cached(cached));
    assert!(second.restore().unwrap());
    assert_eq!(second.dataset(), first.dataset());
    let keys: Vec<&str> = second.dataset().rows()[0].keys().collect();
    assert_eq!(keys, vec!["Name", "Index"]);
}

#[test]
fn second_upload_replaces_everything_no_merge() {
    let mut controller = UploadController::new(MemoryStore::new());
    controller.replace_dataset(make_dataset(250)).unwrap();
    controller.next_page();
    assert_eq!(controller.current_page(), 2);

    controller.replace_dataset(make_dataset(5)).unwrap();
    assert_eq!(controller.dataset().len(), 5, "no merge with prior dataset");
    assert_eq!(controller.current_page(), 1, "page resets for the new length");
    let cached = controller.store().cached().unwrap();
    assert_eq!(Dataset::from_json(cached).unwrap().len(), 5);
}

/// Store that counts writes, to observe unconditional cache mutation.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: usize,
}

impl DatasetStore for CountingStore {
    fn load(&self) -> sheetpager::error::Result<Option<String>> {
        self.inner.load()
    }

    fn save(&mut self, json: &str) -> sheetpager::error::Result<()> {
        self.writes += 1;
        self.inner.save(json)
    }
}

#[test]
fn upload_writes_cache_even_for_identical_content() {
    let mut controller = UploadController::new(CountingStore::default());
    controller.replace_dataset(make_dataset(3)).unwrap();
    controller.replace_dataset(make_dataset(3)).unwrap();
    assert_eq!(controller.store().writes, 2, "every upload writes the cache");
}

#[test]
fn ingest_parses_through_the_capability() {
    let mut controller = UploadController::new(MemoryStore::new());
    controller
        .ingest(&JsonParser, br#"[{"Name":"Ada","Age":36}]"#)
        .unwrap();
    assert_eq!(controller.dataset().len(), 1);
    assert!(controller.table_visible());
}

#[test]
fn failed_parse_changes_no_state() {
    let mut controller = UploadController::new(MemoryStore::new());
    assert!(controller.ingest(&JsonParser, b"\x00\x01binary").is_err());
    assert!(!controller.table_visible());
    assert!(controller.dataset().is_empty());
    assert!(controller.store().cached().is_none(), "cache untouched");
}

#[test]
fn navigation_is_bounded() {
    let mut controller = UploadController::new(MemoryStore::new());
    controller.replace_dataset(make_dataset(250)).unwrap();

    assert!(controller.at_first_page());
    assert!(!controller.previous_page(), "previous on page 1 is a no-op");

    assert!(controller.next_page());
    assert!(controller.next_page());
    assert!(controller.at_last_page());
    assert!(!controller.next_page(), "next on the last page is a no-op");
    assert_eq!(controller.current_page(), 3);

    assert!(controller.previous_page());
    assert_eq!(controller.current_page(), 2);
}

#[test]
fn visible_rows_follow_the_page() {
    let mut controller = UploadController::new(MemoryStore::new());
    controller.replace_dataset(make_dataset(250)).unwrap();

    assert_eq!(controller.visible_rows().len(), 100);
    controller.next_page();
    controller.next_page();
    let last = controller.visible_rows();
    assert_eq!(last.len(), 50);
    assert_eq!(
        last[0].get("Index"),
        Some(&CellValue::Number(200.0)),
        "page 3 starts at row 200"
    );
}

#[test]
fn empty_dataset_upload_shows_table_block_but_no_rows() {
    let mut controller = UploadController::new(MemoryStore::new());
    controller.replace_dataset(Dataset::new()).unwrap();
    assert!(controller.table_visible());
    assert!(controller.visible_rows().is_empty());
    assert_eq!(controller.page_count(), 1);
    assert!(controller.at_first_page());
    assert!(controller.at_last_page());
}

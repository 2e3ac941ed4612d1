//! CLI tool for sheetpager - prints one page of a JSON row-array dataset
//!
//! Usage:
//!   sheetpager_cli <dataset.json>        # Print page 1
//!   sheetpager_cli <dataset.json> 3      # Print page 3

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;

use sheetpager::pagination::{page_count, visible_slice, RECORDS_PER_PAGE};
use sheetpager::parser::{JsonParser, RowsParser};
use sheetpager::table::render_text;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sheetpager_cli <dataset.json> [page]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let page: usize = if args.len() > 2 {
        match args[2].parse() {
            Ok(p) if p >= 1 => p,
            _ => {
                eprintln!("Page must be a positive integer");
                std::process::exit(1);
            }
        }
    } else {
        1
    };

    // Read input file
    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Decode the row array
    let dataset = match JsonParser.parse(&data) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("Error decoding dataset: {}", e);
            std::process::exit(1);
        }
    };

    let pages = page_count(dataset.len(), RECORDS_PER_PAGE);
    let slice = visible_slice(dataset.rows(), page, RECORDS_PER_PAGE);

    match render_text(slice) {
        Some(text) => {
            println!("{}", text);
            println!("Page {} of {} ({} rows total)", page, pages, dataset.len());
        }
        None => {
            println!("Page {} of {} is empty ({} rows total)", page, pages, dataset.len());
        }
    }
}

use crate::table::Table;
use std::io::Cursor;

/// Build an in-memory table; `label` stands in for the file name.
pub(crate) fn table(label: &str, text: &str) -> Table {
    Table::from_reader(label, Cursor::new(text.to_string())).expect("in-memory table should read")
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

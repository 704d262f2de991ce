//! Record store: the ordered batch of [`DesignRecord`]s parsed from a table.
//!
//! - [`source`] – table source abstraction (CSV, spreadsheet, in-memory rows)
//!
//! Rows are positional. Column layout, after a single header row:
//!
//! | column | field          |
//! |--------|----------------|
//! | 0      | image reference|
//! | 1      | nominal size   |
//! | 2      | order id       |
//! | 3      | display name   |
//! | 4      | color          |
//! | 5      | article code   |

pub mod source;

pub use source::*;

use crate::error::LayoutError;
use crate::model::{DesignRecord, UNKNOWN};

const COL_IMAGE: usize = 0;
const COL_SIZE: usize = 1;
const COL_ORDER: usize = 2;
const COL_NAME: usize = 3;
const COL_COLOR: usize = 4;
const COL_ARTICLE: usize = 5;

/// A primitive cell value as produced by a [`TableSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet error value such as `#REF!`.
    Error(String),
}

impl Cell {
    /// Blank cells and whitespace-only text count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as display text. `None` for blank cells.
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Error(e) => Some(e.clone()),
            Cell::Empty => None,
        }
    }

    /// Text for a record field. Zero and `false` read as blank, like empty
    /// cells, so a stray `0` never becomes an article code.
    pub fn field_text(&self) -> Option<String> {
        match self {
            Cell::Number(n) if *n == 0.0 => None,
            Cell::Bool(false) => None,
            _ => self.as_text(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// Ordered collection of design records with stable indices.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<DesignRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a full table (header row included) into a fresh batch.
    ///
    /// A table with no rows at all is [`LayoutError::SourceUnavailable`];
    /// an error cell in one of the used columns is [`LayoutError::ParseFailure`].
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::SourceUnavailable("table is empty".into()));
        }
        let mut records = Vec::new();
        for (row_no, row) in rows.iter().enumerate().skip(1) {
            if row.iter().all(Cell::is_empty) {
                continue;
            }
            let cell_error = row
                .iter()
                .take(COL_ARTICLE + 1)
                .enumerate()
                .find_map(|(col, c)| match c {
                    Cell::Error(e) => Some((col, e)),
                    _ => None,
                });
            if let Some((col, e)) = cell_error {
                return Err(LayoutError::ParseFailure(format!(
                    "row {}, column {}: cell error {}",
                    row_no + 1,
                    col + 1,
                    e
                )));
            }
            let text = |col: usize| row.get(col).and_then(Cell::field_text);
            records.push(DesignRecord {
                index: records.len(),
                source_row: row_no,
                image_ref: text(COL_IMAGE),
                nominal_size: text(COL_SIZE).unwrap_or_else(|| UNKNOWN.to_string()),
                order_id: text(COL_ORDER).unwrap_or_default(),
                display_name: text(COL_NAME).unwrap_or_default(),
                color: text(COL_COLOR).unwrap_or_default(),
                article_code: text(COL_ARTICLE).unwrap_or_else(|| UNKNOWN.to_string()),
                layer_match: None,
            });
        }
        tracing::debug!("Parsed {} records from {} rows", records.len(), rows.len());
        Ok(Self { records })
    }

    /// Read all rows from `source` and parse them.
    pub fn load(source: &mut dyn TableSource) -> Result<Self, LayoutError> {
        let rows = source.read_rows()?;
        Self::from_rows(&rows)
    }

    pub fn records(&self) -> &[DesignRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DesignRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DesignRecord> {
        self.records.get_mut(index)
    }

    /// Swap in records produced by a reconciliation pass over this batch.
    pub(crate) fn replace_records(&mut self, records: Vec<DesignRecord>) {
        debug_assert_eq!(records.len(), self.records.len());
        self.records = records;
    }
}

//! Table source abstraction for reading rows from CSV files, spreadsheets or memory.

use camino::{Utf8Path, Utf8PathBuf};

use super::Cell;
use crate::error::LayoutError;

/// Trait for abstracting where table rows come from.
pub trait TableSource {
    /// Read every row of the first sheet, header row included.
    fn read_rows(&mut self) -> Result<Vec<Vec<Cell>>, LayoutError>;
}

/// Rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct RowsSource {
    pub rows: Vec<Vec<Cell>>,
}

impl RowsSource {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }
}

impl TableSource for RowsSource {
    fn read_rows(&mut self) -> Result<Vec<Vec<Cell>>, LayoutError> {
        Ok(self.rows.clone())
    }
}

fn ensure_non_empty_file(path: &Utf8Path) -> Result<(), LayoutError> {
    let meta = std::fs::metadata(path.as_std_path())
        .map_err(|e| LayoutError::SourceUnavailable(format!("{}: {}", path, e)))?;
    if meta.len() == 0 {
        return Err(LayoutError::SourceUnavailable(format!("{} is empty", path)));
    }
    Ok(())
}

/// Reads a comma-separated file. All cells are text; rows may have any length.
pub struct CsvSource {
    path: Utf8PathBuf,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TableSource for CsvSource {
    fn read_rows(&mut self) -> Result<Vec<Vec<Cell>>, LayoutError> {
        ensure_non_empty_file(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(self.path.as_std_path())
            .map_err(|e| LayoutError::SourceUnavailable(format!("{}: {}", self.path, e)))?;
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                if e.is_io_error() {
                    LayoutError::SourceUnavailable(format!("{}: {}", self.path, e))
                } else {
                    LayoutError::ParseFailure(format!("{}: {}", self.path, e))
                }
            })?;
            rows.push(record.iter().map(Cell::from).collect());
        }
        Ok(rows)
    }
}

/// Reads the first worksheet of a spreadsheet workbook (`.xlsx`, `.xls`, `.ods`).
#[cfg(feature = "xlsx")]
pub struct XlsxSource {
    path: Utf8PathBuf,
}

#[cfg(feature = "xlsx")]
impl XlsxSource {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn convert(data: &calamine::Data) -> Cell {
        use calamine::Data;
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::from(s.as_str()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::Error(e) => Cell::Error(e.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

#[cfg(feature = "xlsx")]
impl TableSource for XlsxSource {
    fn read_rows(&mut self) -> Result<Vec<Vec<Cell>>, LayoutError> {
        use calamine::Reader;

        ensure_non_empty_file(&self.path)?;
        let mut workbook = calamine::open_workbook_auto(self.path.as_std_path()).map_err(|e| {
            match e {
                calamine::Error::Io(io) => {
                    LayoutError::SourceUnavailable(format!("{}: {}", self.path, io))
                }
                other => LayoutError::ParseFailure(format!("{}: {}", self.path, other)),
            }
        })?;
        let first = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LayoutError::ParseFailure(format!("{} has no sheets", self.path)))?;
        let range = workbook
            .worksheet_range(&first)
            .map_err(|e| LayoutError::ParseFailure(format!("{} [{}]: {}", self.path, first, e)))?;
        tracing::debug!("Sheet '{}' of {}: {} rows", first, self.path, range.height());
        // The used range may start right of column A; pad so fields stay positional.
        // Leading blank rows are dropped: the first used row is the header.
        let lead = range.start().map_or(0, |(_, col)| col as usize);
        Ok(range
            .rows()
            .map(|row| {
                let mut cells = vec![Cell::Empty; lead];
                cells.extend(row.iter().map(Self::convert));
                cells
            })
            .collect())
    }
}

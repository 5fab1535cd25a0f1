//! In-memory workbook model: ordered sheets of untyped cells.

use std::borrow::Cow;

use crate::error::{FinscanError, Result};

static EMPTY_CELL: Cell = Cell::Empty;

/// A single spreadsheet cell as handed over by a tabular loader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Numeric cell (integers are widened to `f64`).
    Number(f64),
    /// Text cell.
    Text(String),
    /// Boolean cell.
    Bool(bool),
}

impl Cell {
    /// Whether the cell carries no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Render the cell as text, the way a tabular loader stringifies it.
    ///
    /// Integral numbers are printed without a fractional part so that a
    /// numeric year header (`2024`) reads the same as a textual one.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Cell::Number(n) if n.is_nan() => Cow::Borrowed("nan"),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned(format!("{}", *n as i64))
            }
            Cell::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// A 2-D grid of cells with no assumed header row.
///
/// Rows may be ragged; the column count is the width of the widest row and
/// reads past the end of a short row yield [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Sheet {
    /// Create an empty sheet (zero rows, zero columns).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from row-major cells.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Append a row, widening the sheet if needed.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.width = self.width.max(row.len());
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (width of the widest row).
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// Whether the sheet has no usable grid (zero rows or zero columns).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    /// Cell at `(row, col)`; out-of-range reads yield an empty cell.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// The first `limit` cells of a column, top to bottom.
    pub fn column_head(&self, col: usize, limit: usize) -> impl Iterator<Item = &Cell> + '_ {
        (0..self.rows.len().min(limit)).map(move |r| self.cell(r, col))
    }
}

/// Ordered mapping from sheet name to [`Sheet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<(String, Sheet)>,
}

impl Workbook {
    /// Create a workbook without sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet, keeping declaration order.
    ///
    /// Sheet names must be unique within a workbook.
    pub fn add_sheet(&mut self, name: impl Into<String>, sheet: Sheet) -> Result<()> {
        let name = name.into();
        if self.sheets.iter().any(|(existing, _)| *existing == name) {
            return Err(FinscanError::InvalidInput(format!(
                "duplicate sheet name: {name}"
            )));
        }
        self.sheets.push((name, sheet));
        Ok(())
    }

    /// Builder form of [`Workbook::add_sheet`].
    pub fn with_sheet(mut self, name: impl Into<String>, sheet: Sheet) -> Result<Self> {
        self.add_sheet(name, sheet)?;
        Ok(self)
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, sheet)| sheet)
    }

    /// Sheets in declaration order.
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(name, sheet)| (name.as_str(), sheet))
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

use std::path::{Path, PathBuf};

use log::debug;

use crate::{
    core::{
        grid::{extent, CellGrid},
        header::{Header, HeaderTable},
        value::CellValue,
    },
    error::{CsvError, Result},
};

/// A cell addressed by its grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'a> {
    pub row: usize,
    pub column: usize,
    pub value: &'a CellValue,
}

/// In-memory CSV document: a header table over a rectangular cell grid.
///
/// Rows and columns are exposed as borrowed views computed on demand, so they
/// always reflect the grid as it is when they are read.
///
/// # Examples
///
/// ```
/// use csv_grid::core::{document::CsvDocument, value::CellValue};
///
/// let mut document = CsvDocument::new();
/// document.set(5, 0, "x").unwrap();
///
/// assert_eq!(document.num_rows(), 6);
/// assert_eq!(document.num_columns(), 1);
/// assert_eq!(document.get(2, 0).unwrap(), &CellValue::Empty);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDocument {
    headers: HeaderTable,
    grid: CellGrid,
    delimiter: u8,
    has_headers: bool,
    filename: Option<PathBuf>,
}

impl Default for CsvDocument {
    fn default() -> Self {
        Self {
            headers: HeaderTable::new(),
            grid: CellGrid::new(),
            delimiter: b',',
            has_headers: true,
            filename: None,
        }
    }
}

impl CsvDocument {
    /// An empty document: no headers, no rows, comma delimited.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document carrying `headers` and no rows.
    pub(crate) fn with_headers(headers: HeaderTable) -> Self {
        Self {
            headers,
            ..Self::default()
        }
    }

    pub(crate) fn with_format(delimiter: u8, has_headers: bool) -> Self {
        Self {
            delimiter,
            has_headers,
            ..Self::default()
        }
    }

    /// Delimiter the document was parsed with (`,` for fresh documents).
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Whether the text form of this document carries a header line.
    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    /// Sets whether the text form carries a header line. The header table itself is kept.
    pub fn set_has_headers(&mut self, yes: bool) {
        self.has_headers = yes;
    }

    /// Path of the file this document was read from, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub(crate) fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// The header table, in column order.
    pub fn headers(&self) -> &HeaderTable {
        &self.headers
    }

    /// Replaces the header table. Existing rows are widened with empty cells
    /// when the new table has more headers than the grid has columns.
    pub(crate) fn set_headers(&mut self, headers: HeaderTable) -> Result<()> {
        if self.grid.rows() > 0 {
            self.grid.grow(self.grid.rows(), headers.len())?;
        }

        self.headers = headers;
        Ok(())
    }

    /// Number of rows, not counting the header line.
    pub fn num_rows(&self) -> usize {
        self.grid.rows()
    }

    /// Width of the grid once it has rows, the header count before that.
    pub fn num_columns(&self) -> usize {
        if self.grid.rows() > 0 {
            self.grid.columns()
        } else {
            self.headers.len()
        }
    }

    /// Reads the value at `(row, column)`.
    ///
    /// A document without cells reads [`CellValue::Empty`] everywhere. Once
    /// it has cells, coordinates outside the grid fail with
    /// [`CsvError::IndexOutOfRange`].
    pub fn get(&self, row: usize, column: usize) -> Result<&CellValue> {
        self.grid.get(row, column)
    }

    /// Like [`get`](CsvDocument::get), but keeps the coordinates with the value.
    pub fn cell(&self, row: usize, column: usize) -> Result<Cell<'_>> {
        let value = self.grid.get(row, column)?;
        Ok(Cell { row, column, value })
    }

    /// Assigns a cell, growing the grid when `(row, column)` lies beyond it.
    ///
    /// The grid never ends up narrower than the header table, and every cell
    /// created by the growth is [`CellValue::Empty`]. Coordinates too large
    /// to grow to fail with [`CsvError::InvalidArgument`] and leave the
    /// document unchanged.
    ///
    /// ```
    /// use csv_grid::{core::document::CsvDocument, CsvError};
    ///
    /// let mut document = CsvDocument::new();
    /// document.set(1, 2, 42_i32).unwrap();
    ///
    /// assert_eq!(document.num_columns(), 3);
    /// assert!(matches!(
    ///     document.set(usize::MAX, 0, "x"),
    ///     Err(CsvError::InvalidArgument(_))
    /// ));
    /// assert_eq!(document.num_rows(), 2);
    /// ```
    pub fn set<V: Into<CellValue>>(&mut self, row: usize, column: usize, value: V) -> Result<()> {
        let rows = extent("row", row)?;
        let columns = extent("column", column)?.max(self.headers.len());
        self.grid.grow(rows, columns)?;
        self.grid.set(row, column, value.into())
    }

    /// Appends a header at the end of the header table. Existing rows are
    /// left as they are.
    pub fn append_header<S: Into<String>>(&mut self, title: S) -> Result<&Header> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CsvError::MissingArgument("title"));
        }

        Ok(self.headers.push(title))
    }

    /// Appends a header together with a column of empty cells.
    pub fn append_column<S: Into<String>>(&mut self, title: S) -> Result<usize> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CsvError::MissingArgument("title"));
        }

        let index = self.num_columns();
        if self.grid.rows() > 0 {
            self.grid.grow(self.grid.rows(), index + 1)?;
        }

        while self.headers.len() < index {
            let position = self.headers.len();
            self.headers.push(format!("Column{}", position + 1));
        }
        self.headers.push(title);

        debug!("Appended column {index}");
        Ok(index)
    }

    pub(crate) fn rename_header(&mut self, index: usize, title: String) {
        self.headers.rename(index, title);
    }

    /// Removes a column and its header. Later columns shift left by one.
    pub fn remove_column(&mut self, index: usize) -> Result<()> {
        let len = self.grid.columns().max(self.headers.len());
        if index >= len {
            return Err(CsvError::out_of_range("column", index, len));
        }

        if index < self.grid.columns() {
            self.grid.remove_column(index)?;
        }
        self.headers.remove(index);

        debug!("Removed column {index}");
        Ok(())
    }

    /// Removes a row. Later rows shift up by one.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.grid.remove_row(index)?;
        debug!("Removed row {index}");
        Ok(())
    }

    /// A view over row `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        (index < self.num_rows()).then_some(RowView {
            document: self,
            index,
        })
    }

    /// Views over every row, top to bottom.
    ///
    /// ```
    /// use csv_grid::format::csv_parser::CsvParserBuilder;
    ///
    /// let document = CsvParserBuilder::new().from_str("a,b\n1,2\n3,4").unwrap();
    /// let sums: Vec<usize> = document
    ///     .rows()
    ///     .map(|row| row.values().iter().filter_map(|v| v.as_str()?.parse::<usize>().ok()).sum())
    ///     .collect();
    ///
    /// assert_eq!(sums, vec![3, 7]);
    /// ```
    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowView<'_>> {
        (0..self.num_rows()).map(move |index| RowView {
            document: self,
            index,
        })
    }

    /// A view over column `index`, or `None` past the last column.
    pub fn column(&self, index: usize) -> Option<ColumnView<'_>> {
        (index < self.num_columns()).then_some(ColumnView {
            document: self,
            index,
        })
    }

    /// Views over every column, left to right.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = ColumnView<'_>> {
        (0..self.num_columns()).map(move |index| ColumnView {
            document: self,
            index,
        })
    }
}

/// Cells of one grid row, in column order.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    document: &'a CsvDocument,
    index: usize,
}

impl<'a> RowView<'a> {
    /// Position of the row in the grid.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The row's values, one per column.
    pub fn values(&self) -> &'a [CellValue] {
        self.document.grid.row(self.index).unwrap_or(&[])
    }

    /// The row's values together with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'a>> + use<'a> {
        let row = self.index;
        self.values()
            .iter()
            .enumerate()
            .map(move |(column, value)| Cell { row, column, value })
    }

    /// The value in `column`, or `None` past the last column.
    pub fn get(&self, column: usize) -> Option<&'a CellValue> {
        self.values().get(column)
    }
}

/// Cells of one grid column, in row order.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    document: &'a CsvDocument,
    index: usize,
}

impl<'a> ColumnView<'a> {
    /// Position of the column in the grid.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The header at the same position, if the header table reaches it.
    pub fn header(&self) -> Option<&'a Header> {
        self.document.headers.get(self.index)
    }

    /// The column's values, top to bottom.
    pub fn values(&self) -> impl Iterator<Item = &'a CellValue> + use<'a> {
        let document = self.document;
        let index = self.index;
        (0..document.num_rows()).filter_map(move |row| document.grid.row(row)?.get(index))
    }

    /// The column's values together with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'a>> + use<'a> {
        let document = self.document;
        let column = self.index;
        (0..document.num_rows()).filter_map(move |row| {
            let value = document.grid.row(row)?.get(column)?;
            Some(Cell { row, column, value })
        })
    }
}

use log::trace;

use crate::{
    core::value::{CellValue, EMPTY},
    error::{CsvError, Result},
};

/// Rectangular cell storage.
///
/// Cells live in one row-major `Vec` with a stride of `columns`. The extents
/// are tracked separately so a grid can keep its rows even when every column
/// has been removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    cells: Vec<CellValue>,
    rows: usize,
    columns: usize,
}

impl CellGrid {
    /// An empty grid with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows, including rows made only of empty cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of every row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// True when the grid holds no cell at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads the cell at `(row, column)`.
    ///
    /// A grid without cells answers every read with [`CellValue::Empty`];
    /// once populated, reads outside the extents fail.
    pub fn get(&self, row: usize, column: usize) -> Result<&CellValue> {
        if self.is_empty() {
            return Ok(&EMPTY);
        }

        self.check_bounds(row, column)?;
        Ok(&self.cells[row * self.columns + column])
    }

    /// Assigns a cell, growing the grid first if `(row, column)` lies outside it.
    ///
    /// Fails without touching the grid when the coordinates are too large
    /// for the grid to be extended to them.
    pub fn set(&mut self, row: usize, column: usize, value: CellValue) -> Result<()> {
        let rows = extent("row", row)?;
        let columns = extent("column", column)?;
        self.grow(rows, columns)?;

        let offset = row * self.columns + column;
        self.cells[offset] = value;
        Ok(())
    }

    /// Extends the grid to at least `rows` x `columns`, filling every new
    /// cell with [`CellValue::Empty`].
    ///
    /// The grid is left as it was if the new cell count overflows or cannot
    /// be allocated.
    pub fn grow(&mut self, rows: usize, columns: usize) -> Result<()> {
        let rows = rows.max(self.rows);
        let columns = columns.max(self.columns);
        if rows == self.rows && columns == self.columns {
            return Ok(());
        }

        let len = rows.checked_mul(columns).ok_or_else(|| {
            CsvError::InvalidArgument(format!("a grid of {rows} x {columns} cells is too large"))
        })?;

        if columns > self.columns {
            trace!("Widening grid from {} to {} columns", self.columns, columns);

            let mut cells = Vec::new();
            reserve(&mut cells, len)?;
            for row in 0..self.rows {
                let start = row * self.columns;
                cells.extend(self.cells[start..start + self.columns].iter().cloned());
                cells.resize((row + 1) * columns, CellValue::Empty);
            }
            self.cells = cells;
        } else {
            let additional = len - self.cells.len();
            reserve(&mut self.cells, additional)?;
        }

        if rows > self.rows {
            trace!("Growing grid from {} to {} rows", self.rows, rows);
        }
        self.cells.resize(len, CellValue::Empty);
        self.rows = rows;
        self.columns = columns;

        Ok(())
    }

    /// The cells of row `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        if index >= self.rows {
            return None;
        }

        let start = index * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// The cells of column `index` in row order, or `None` past the last
    /// column.
    pub fn column(&self, index: usize) -> Option<impl Iterator<Item = &CellValue>> {
        if index >= self.columns {
            return None;
        }

        Some(self.cells.iter().skip(index).step_by(self.columns))
    }

    /// Removes row `index` and returns its cells. Later rows shift up.
    pub fn remove_row(&mut self, index: usize) -> Result<Vec<CellValue>> {
        if index >= self.rows {
            return Err(CsvError::out_of_range("row", index, self.rows));
        }

        let start = index * self.columns;
        let removed = self.cells.drain(start..start + self.columns).collect();
        self.rows -= 1;

        Ok(removed)
    }

    /// Removes column `index` and returns its cells in row order. Later
    /// columns shift left.
    pub fn remove_column(&mut self, index: usize) -> Result<Vec<CellValue>> {
        if index >= self.columns {
            return Err(CsvError::out_of_range("column", index, self.columns));
        }

        let stride = self.columns;
        let mut removed = Vec::with_capacity(self.rows);
        let mut kept = Vec::with_capacity(self.rows * (stride - 1));

        for (offset, cell) in std::mem::take(&mut self.cells).into_iter().enumerate() {
            if offset % stride == index {
                removed.push(cell);
            } else {
                kept.push(cell);
            }
        }

        self.cells = kept;
        self.columns -= 1;

        Ok(removed)
    }

    fn check_bounds(&self, row: usize, column: usize) -> Result<()> {
        if row >= self.rows {
            return Err(CsvError::out_of_range("row", row, self.rows));
        }

        if column >= self.columns {
            return Err(CsvError::out_of_range("column", column, self.columns));
        }

        Ok(())
    }
}

/// Number of rows or columns needed to hold `index`.
pub(crate) fn extent(name: &'static str, index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .ok_or_else(|| CsvError::InvalidArgument(format!("{name} index {index} is too large")))
}

fn reserve(cells: &mut Vec<CellValue>, additional: usize) -> Result<()> {
    cells.try_reserve_exact(additional).map_err(|error| {
        CsvError::InvalidArgument(format!("cannot grow grid by {additional} cells: {error}"))
    })
}

//! Data
//!
//! Dense containers used by the tests: an owned column-major [`Grid`] for every
//! field computed over a sample space, and the validated [`ContingencyTable`]
//! the public entry points accept.
use crate::errors::HypotestError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Contiguous Column Major grid of values.
///
/// The grid owns its data in a single memory block, column after column. Fields
/// over the sample space and the per-round probability field are stored this way,
/// so a whole column can be handed out as a slice and columns can be processed
/// independently.
///
/// # Type Parameters
/// * `T` - The element type (e.g. `f64` for statistics, `bool` for masks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    /// The raw data stored in a single vector.
    pub data: Vec<T>,
    /// Number of rows in the grid.
    pub rows: usize,
    /// Number of columns in the grid.
    pub cols: usize,
    stride1: usize,
    stride2: usize,
}

impl<T> Grid<T> {
    /// Create a new grid from column-major data.
    ///
    /// * `data` - Values, column after column. Its length must be `rows * cols`.
    /// * `rows` - Number of rows.
    /// * `cols` - Number of columns.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Grid {
            data,
            rows,
            cols,
            stride1: rows,
            stride2: 1,
        }
    }

    /// Build a grid by evaluating `f(i, j)` for every cell, in column-major order.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Grid::new(data, rows, cols)
    }

    /// Get a single reference to an item in the grid.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[self.item_index(i, j)]
    }

    fn item_index(&self, i: usize, j: usize) -> usize {
        let mut idx = self.stride2 * i;
        idx += j * self.stride1;
        idx
    }

    /// Get an entire column in the grid.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &[T] {
        let start = self.item_index(0, col);
        &self.data[start..start + self.rows]
    }

    /// Get access to a row of the data, as an iterator.
    pub fn get_row_iter(&self, row: usize) -> std::iter::StepBy<std::iter::Skip<std::slice::Iter<'_, T>>> {
        self.data.iter().skip(row).step_by(self.rows.max(1))
    }

    /// The cells of the grid, in column-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Send + Sync> Grid<T> {
    /// Iterate over the columns in parallel.
    pub fn par_cols(&self) -> rayon::slice::Chunks<'_, T> {
        self.data.par_chunks(self.rows.max(1))
    }

    /// Iterate mutably over the columns in parallel.
    pub fn par_cols_mut(&mut self) -> rayon::slice::ChunksMut<'_, T> {
        self.data.par_chunks_mut(self.rows.max(1))
    }
}

impl<T> Grid<T> {
    /// Iterate over the columns.
    pub fn cols_iter(&self) -> std::slice::Chunks<'_, T> {
        self.data.chunks(self.rows.max(1))
    }

    /// Iterate mutably over the columns.
    pub fn cols_iter_mut(&mut self) -> std::slice::ChunksMut<'_, T> {
        self.data.chunks_mut(self.rows.max(1))
    }
}

/// A table of non-negative counts cross-classifying two categorical variables.
///
/// The first variable indexes rows, the second indexes columns. Once built the
/// table is immutable; every test reads it but none modifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    counts: Grid<u64>,
}

impl ContingencyTable {
    /// Build a table from its rows.
    ///
    /// * `rows` - One vector of counts per row. Every row must have the same,
    ///   non-zero, length and every count must be non-negative.
    pub fn new(rows: &[Vec<i64>]) -> Result<Self, HypotestError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        if n_rows == 0 || n_cols == 0 {
            return Err(HypotestError::InvalidShape(
                "at least (1, 1)".to_string(),
                format!("({}, {})", n_rows, n_cols),
            ));
        }
        if let Some(ragged) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(HypotestError::InvalidShape(
                format!("({}, {})", n_rows, n_cols),
                format!("a row of length {}", ragged.len()),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if let Some((j, &v)) = row.iter().enumerate().find(|(_, v)| **v < 0) {
                return Err(HypotestError::NegativeCount(i, j, v));
            }
        }
        let counts = Grid::from_fn(n_rows, n_cols, |i, j| rows[i][j] as u64);
        Ok(ContingencyTable { counts })
    }

    /// Build a 2x2 table `[[a, b], [c, d]]`.
    pub fn from_2x2(table: [[i64; 2]; 2]) -> Result<Self, HypotestError> {
        ContingencyTable::new(&[table[0].to_vec(), table[1].to_vec()])
    }

    /// Number of rows and columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.counts.rows, self.counts.cols)
    }

    /// Count in row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        *self.counts.get(i, j)
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<u64> {
        (0..self.counts.rows).map(|i| self.counts.get_row_iter(i).sum()).collect()
    }

    /// Sum of each column.
    pub fn col_sums(&self) -> Vec<u64> {
        self.counts.cols_iter().map(|c| c.iter().sum()).collect()
    }

    /// Number of cells holding a non-zero count.
    pub fn n_nonzero(&self) -> usize {
        self.counts.data.iter().filter(|v| **v > 0).count()
    }

    /// The table with rows and columns exchanged.
    pub fn transpose(&self) -> Self {
        let counts = Grid::from_fn(self.counts.cols, self.counts.rows, |i, j| *self.counts.get(j, i));
        ContingencyTable { counts }
    }
}

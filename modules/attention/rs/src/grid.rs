use std::ops::Index;

use crate::error::{Error, Result};

/// Grid is a dense, row-major rectangular matrix.
/// It's not represented as nested vectors for a couple of reasons:
/// - Every row is guaranteed to have the same number of columns (checked once at construction)
/// - Shapes of several grids can be compared directly before any work is done on them
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    /// Build a grid from nested rows. Fails if rows have different lengths.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(nrows * ncols);
        for (ind, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::shape_mismatch(format!(
                    "row {ind} has {} columns, expected {ncols} (grid must be rectangular)",
                    row.len()
                )));
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    /// Build a grid from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::shape_mismatch(format!(
                "{} values can't fill a {rows}x{cols} grid",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            Some(&self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Values in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[T]> + Clone + '_ {
        (0..self.rows).map(move |row| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn try_map<U, E>(
        self,
        f: impl FnMut(T) -> std::result::Result<U, E>,
    ) -> std::result::Result<Grid<U>, E> {
        Ok(Grid {
            data: self.data.into_iter().map(f).collect::<std::result::Result<_, _>>()?,
            rows: self.rows,
            cols: self.cols,
        })
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
    type Error = Error;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) is out of range for a {}x{} grid",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

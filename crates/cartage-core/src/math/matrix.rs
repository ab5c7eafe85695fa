// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Dense Row-Major Matrix
//!
//! A minimal rectangular matrix over `Copy` scalars, stored as one flat
//! `Vec<T>` addressed by `row * cols + col`. Both the cost table and the
//! allocation table of a transportation instance share this shape, and the
//! balancing step needs to grow either dimension by one, so the type also
//! supports appending a filled row or column.
//!
//! ## Usage
//!
//! ```rust
//! use cartage_core::math::matrix::Matrix;
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! assert_eq!(m.rows(), 2);
//! assert_eq!(m.cols(), 2);
//! assert_eq!(m.get(1, 0), 3.0);
//! ```

#[inline(always)]
fn flatten_index(cols: usize, row: usize, col: usize) -> usize {
    row * cols + col
}

/// A dense, row-major matrix.
#[derive(Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: Copy,
{
    /// Creates a `rows × cols` matrix with every entry set to `value`.
    #[inline]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Builds a matrix from nested row vectors.
    ///
    /// Returns `None` if `rows` is empty, the first row is empty, or any
    /// row has a different length than the first (ragged input).
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map(Vec::len)?;
        if num_cols == 0 {
            return None;
        }

        let mut data = Vec::with_capacity(num_rows * num_cols);
        for row in &rows {
            if row.len() != num_cols {
                return None;
            }
            data.extend_from_slice(row);
        }

        Some(Self {
            rows: num_rows,
            cols: num_cols,
            data,
        })
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(
            row < self.rows,
            "called `Matrix::get` with row index out of bounds: the len is {} but the index is {}",
            self.rows,
            row
        );
        debug_assert!(
            col < self.cols,
            "called `Matrix::get` with column index out of bounds: the len is {} but the index is {}",
            self.cols,
            col
        );

        self.data[flatten_index(self.cols, row, col)]
    }

    /// Sets the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(
            row < self.rows,
            "called `Matrix::set` with row index out of bounds: the len is {} but the index is {}",
            self.rows,
            row
        );
        debug_assert!(
            col < self.cols,
            "called `Matrix::set` with column index out of bounds: the len is {} but the index is {}",
            self.cols,
            col
        );

        self.data[flatten_index(self.cols, row, col)] = value;
    }

    /// Returns an iterator over the entries of one row, in column order.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[inline]
    pub fn iter_row(&self, row: usize) -> impl Iterator<Item = T> + '_ {
        debug_assert!(
            row < self.rows,
            "called `Matrix::iter_row` with row index out of bounds: the len is {} but the index is {}",
            self.rows,
            row
        );

        let start = flatten_index(self.cols, row, 0);
        self.data[start..start + self.cols].iter().copied()
    }

    /// Returns an iterator over the entries of one column, in row order.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    #[inline]
    pub fn iter_col(&self, col: usize) -> impl Iterator<Item = T> + '_ {
        debug_assert!(
            col < self.cols,
            "called `Matrix::iter_col` with column index out of bounds: the len is {} but the index is {}",
            self.cols,
            col
        );

        (0..self.rows).map(move |row| self.data[flatten_index(self.cols, row, col)])
    }

    /// Returns the flat row-major slice of all entries.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Appends one row filled with `value`.
    pub fn push_row(&mut self, value: T) {
        self.data.extend(std::iter::repeat(value).take(self.cols));
        self.rows += 1;
    }

    /// Appends one column filled with `value`.
    pub fn push_col(&mut self, value: T) {
        let new_cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            let start = flatten_index(self.cols, row, 0);
            data.extend_from_slice(&self.data[start..start + self.cols]);
            data.push(value);
        }
        self.cols = new_cols;
        self.data = data;
    }
}

impl<T> std::fmt::Debug for Matrix<T>
where
    T: Copy + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Matrix({}x{})", self.rows, self.cols)?;
        for row in 0..self.rows {
            write!(f, "  [")?;
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:?}", self.get(row, col))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_accessors() {
        let mut m = Matrix::filled(2, 3, 0.0_f64);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        m.set(1, 2, 7.5);
        assert_eq!(m.get(1, 2), 7.5);
        assert_eq!(m.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_rows_valid() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(0, 1), 2);
        assert_eq!(m.get(1, 0), 4);
        assert_eq!(m.values(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_empty() {
        assert!(Matrix::<i32>::from_rows(vec![]).is_none());
        assert!(Matrix::<i32>::from_rows(vec![vec![]]).is_none());
        assert!(Matrix::from_rows(vec![vec![1, 2], vec![3]]).is_none());
    }

    #[test]
    fn test_row_and_col_iteration() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        let row: Vec<i32> = m.iter_row(1).collect();
        assert_eq!(row, vec![3, 4]);
        let col: Vec<i32> = m.iter_col(1).collect();
        assert_eq!(col, vec![2, 4, 6]);
    }

    #[test]
    fn test_push_row() {
        let mut m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.push_row(0);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.get(2, 0), 0);
        assert_eq!(m.get(2, 1), 0);
        assert_eq!(m.get(1, 1), 4);
    }

    #[test]
    fn test_push_col() {
        let mut m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.push_col(9);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(0, 2), 9);
        assert_eq!(m.get(1, 2), 9);
        assert_eq!(m.get(1, 1), 4);
        assert_eq!(m.values(), &[1, 2, 9, 3, 4, 9]);
    }
}

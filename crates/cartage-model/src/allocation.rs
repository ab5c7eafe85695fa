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

//! # Allocation Tableau
//!
//! The m×n shipment matrix a builder fills and a refiner pivots. A cell is
//! *basic* while it carries flow above the tolerance; the basic set is what
//! the loop finder and the MODI potentials traverse.

use crate::{
    index::{Cell, DestinationIndex, OriginIndex},
    problem::Problem,
};
use cartage_core::{
    math::matrix::Matrix,
    num::{approx::approx_eq, approx::definitely_positive, constants::Tolerance},
};
use num_traits::Float;

/// An owned m×n allocation matrix.
#[derive(Clone, PartialEq)]
pub struct Allocation<T> {
    quantities: Matrix<T>,
}

impl<T> Allocation<T>
where
    T: Float + Tolerance,
{
    /// Creates an all-zero allocation of the given shape.
    #[inline]
    pub fn zeroed(num_origins: usize, num_destinations: usize) -> Self {
        Self {
            quantities: Matrix::filled(num_origins, num_destinations, T::zero()),
        }
    }

    /// Builds an allocation from nested row vectors.
    ///
    /// Returns `None` on ragged or empty input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        Matrix::from_rows(rows).map(|quantities| Self { quantities })
    }

    /// Returns the number of origins (rows).
    #[inline]
    pub fn num_origins(&self) -> usize {
        self.quantities.rows()
    }

    /// Returns the number of destinations (columns).
    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.quantities.cols()
    }

    /// Returns the quantity shipped along `cell`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate of `cell` is out of bounds.
    #[inline]
    pub fn get(&self, cell: Cell) -> T {
        self.quantities.get(cell.origin.get(), cell.destination.get())
    }

    /// Sets the quantity shipped along `cell`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate of `cell` is out of bounds.
    #[inline]
    pub fn set(&mut self, cell: Cell, quantity: T) {
        self.quantities
            .set(cell.origin.get(), cell.destination.get(), quantity);
    }

    /// Returns `true` if `cell` currently carries flow above the tolerance.
    #[inline]
    pub fn is_basic(&self, cell: Cell) -> bool {
        definitely_positive(self.get(cell))
    }

    /// Returns all basic cells in row-major order.
    pub fn basic_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for origin in 0..self.num_origins() {
            for destination in 0..self.num_destinations() {
                let cell = Cell::at(origin, destination);
                if self.is_basic(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Returns the number of basic cells.
    #[inline]
    pub fn num_basic(&self) -> usize {
        self.basic_cells().len()
    }

    /// Returns the total quantity shipped out of one origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is out of bounds.
    #[inline]
    pub fn row_total(&self, origin: OriginIndex) -> T {
        self.quantities
            .iter_row(origin.get())
            .fold(T::zero(), |acc, q| acc + q)
    }

    /// Returns the total quantity shipped into one destination.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is out of bounds.
    #[inline]
    pub fn column_total(&self, destination: DestinationIndex) -> T {
        self.quantities
            .iter_col(destination.get())
            .fold(T::zero(), |acc, q| acc + q)
    }

    /// Evaluates the objective: `Σ alloc[i][j] * cost[i][j]` over all cells.
    ///
    /// Pure function of the current tableau; no state is touched.
    ///
    /// # Panics
    ///
    /// Panics if `costs` has a different shape than this allocation.
    pub fn total_cost(&self, costs: &Matrix<T>) -> T {
        debug_assert!(
            costs.rows() == self.num_origins() && costs.cols() == self.num_destinations(),
            "called `Allocation::total_cost` with cost matrix of mismatched shape: {}x{} vs {}x{}",
            costs.rows(),
            costs.cols(),
            self.num_origins(),
            self.num_destinations()
        );

        self.quantities
            .values()
            .iter()
            .zip(costs.values())
            .fold(T::zero(), |acc, (&q, &c)| acc + q * c)
    }

    /// Returns `true` if row totals match the supply vector and column
    /// totals match the demand vector within tolerance.
    pub fn satisfies(&self, problem: &Problem<T>) -> bool {
        if self.num_origins() != problem.num_origins()
            || self.num_destinations() != problem.num_destinations()
        {
            return false;
        }

        let rows_ok = (0..self.num_origins()).all(|i| {
            let origin = OriginIndex::new(i);
            approx_eq(self.row_total(origin), problem.supply_at(origin))
        });
        let cols_ok = (0..self.num_destinations()).all(|j| {
            let destination = DestinationIndex::new(j);
            approx_eq(self.column_total(destination), problem.demand_at(destination))
        });

        rows_ok && cols_ok
    }

    /// Returns the underlying quantity matrix.
    #[inline]
    pub fn quantities(&self) -> &Matrix<T> {
        &self.quantities
    }
}

impl<T> std::fmt::Debug for Allocation<T>
where
    T: Float + Tolerance + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Allocation {:?}", self.quantities)
    }
}

impl<T> std::fmt::Display for Allocation<T>
where
    T: Float + Tolerance + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for origin in 0..self.num_origins() {
            write!(f, "   ")?;
            for destination in 0..self.num_destinations() {
                write!(f, "{:>10} ", self.get(Cell::at(origin, destination)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_has_no_basic_cells() {
        let a = Allocation::<f64>::zeroed(2, 3);
        assert_eq!(a.num_origins(), 2);
        assert_eq!(a.num_destinations(), 3);
        assert!(a.basic_cells().is_empty());
        assert_eq!(a.num_basic(), 0);
    }

    #[test]
    fn test_basic_cells_row_major() {
        let a = Allocation::from_rows(vec![vec![0.0, 5.0], vec![3.0, 0.0]]).unwrap();
        assert_eq!(a.basic_cells(), vec![Cell::at(0, 1), Cell::at(1, 0)]);
        assert!(a.is_basic(Cell::at(0, 1)));
        assert!(!a.is_basic(Cell::at(0, 0)));
    }

    #[test]
    fn test_marginal_totals() {
        let a = Allocation::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(a.row_total(OriginIndex::new(0)), 3.0);
        assert_eq!(a.row_total(OriginIndex::new(1)), 7.0);
        assert_eq!(a.column_total(DestinationIndex::new(0)), 4.0);
        assert_eq!(a.column_total(DestinationIndex::new(1)), 6.0);
    }

    #[test]
    fn test_total_cost() {
        let a = Allocation::from_rows(vec![vec![5.0, 0.0], vec![0.0, 5.0]]).unwrap();
        let costs = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(a.total_cost(&costs), 25.0);
    }

    #[test]
    fn test_satisfies() {
        let problem = Problem::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![5.0, 5.0],
            vec![5.0, 5.0],
        )
        .unwrap();

        let good = Allocation::from_rows(vec![vec![5.0, 0.0], vec![0.0, 5.0]]).unwrap();
        assert!(good.satisfies(&problem));

        let bad = Allocation::from_rows(vec![vec![4.0, 0.0], vec![0.0, 5.0]]).unwrap();
        assert!(!bad.satisfies(&problem));
    }
}

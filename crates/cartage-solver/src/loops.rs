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

//! # Closed Loops
//!
//! Finding and applying closed alternating loops over the basic cells of a
//! tableau. A loop starts at a non-basic *entering* cell, alternates
//! horizontal and vertical moves through basic cells, and returns to the
//! entering cell with a vertical move. Both refinement strategies reduce to
//! the same two primitives: find the loop for a candidate cell, then shift
//! the feasible maximum quantity around it.
//!
//! The search is a depth-first walk over per-row and per-column adjacency
//! lists built from the basic cells. Candidates are visited in row-major
//! order, so the returned loop is deterministic for a given basis.

use crate::num::TransportNumeric;
use cartage_core::num::approx::snap_zero;
use cartage_model::{allocation::Allocation, index::Cell};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Orientation of the next move in the alternating walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TraversalDirection {
    AlongRow,
    AlongColumn,
}

impl TraversalDirection {
    #[inline]
    fn flip(self) -> Self {
        match self {
            TraversalDirection::AlongRow => TraversalDirection::AlongColumn,
            TraversalDirection::AlongColumn => TraversalDirection::AlongRow,
        }
    }
}

/// A closed alternating loop through the tableau.
///
/// The first cell is the entering cell; cells at even positions gain
/// quantity when the loop is applied, cells at odd positions lose it. The
/// length is always even and at least four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedLoop {
    cells: SmallVec<[Cell; 8]>,
}

impl ClosedLoop {
    /// Returns the loop cells in traversal order, entering cell first.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the entering cell the loop was built for.
    #[inline]
    pub fn entering(&self) -> Cell {
        self.cells[0]
    }

    /// Cells at even positions, whose quantity increases by theta.
    #[inline]
    pub fn increase_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied().step_by(2)
    }

    /// Cells at odd positions, whose quantity decreases by theta.
    #[inline]
    pub fn decrease_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied().skip(1).step_by(2)
    }
}

/// Searches for the closed loop of `entering` over the basic cells of
/// `allocation`.
///
/// Returns `None` when no alternating loop exists, which for a feasible
/// basis only happens on degenerate tableaus.
pub fn find_loop<T>(allocation: &Allocation<T>, entering: Cell) -> Option<ClosedLoop>
where
    T: TransportNumeric,
{
    let num_origins = allocation.num_origins();
    let num_destinations = allocation.num_destinations();

    // Per-row and per-column adjacency over basic cells plus the entering
    // cell itself (it must be reachable to close the loop).
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); num_origins];
    let mut cols: Vec<Vec<Cell>> = vec![Vec::new(); num_destinations];
    for cell in allocation.basic_cells() {
        rows[cell.origin.get()].push(cell);
        cols[cell.destination.get()].push(cell);
    }
    if !allocation.is_basic(entering) {
        rows[entering.origin.get()].push(entering);
        cols[entering.destination.get()].push(entering);
    }

    let mut path: SmallVec<[Cell; 8]> = SmallVec::new();
    path.push(entering);
    let mut visited: FxHashSet<(Cell, TraversalDirection)> = FxHashSet::default();

    if search(
        entering,
        entering,
        TraversalDirection::AlongRow,
        &rows,
        &cols,
        &mut visited,
        &mut path,
    ) {
        Some(ClosedLoop { cells: path })
    } else {
        None
    }
}

fn search(
    entering: Cell,
    current: Cell,
    direction: TraversalDirection,
    rows: &[Vec<Cell>],
    cols: &[Vec<Cell>],
    visited: &mut FxHashSet<(Cell, TraversalDirection)>,
    path: &mut SmallVec<[Cell; 8]>,
) -> bool {
    let candidates = match direction {
        TraversalDirection::AlongRow => &rows[current.origin.get()],
        TraversalDirection::AlongColumn => &cols[current.destination.get()],
    };

    for &next in candidates {
        if next == current {
            continue;
        }
        if next == entering {
            // Closing move must be vertical and the loop must have at
            // least four corners.
            if direction == TraversalDirection::AlongColumn && path.len() >= 4 {
                return true;
            }
            continue;
        }
        if path.contains(&next) || !visited.insert((next, direction)) {
            continue;
        }

        path.push(next);
        if search(entering, next, direction.flip(), rows, cols, visited, path) {
            return true;
        }
        path.pop();
    }

    false
}

/// Shifts the feasible maximum quantity around `closed_loop`: theta, the
/// minimum quantity over the decrease cells, is added at even positions and
/// subtracted at odd positions. Quantities inside the float tolerance are
/// snapped to exactly zero. Returns theta.
pub fn apply_loop<T>(allocation: &mut Allocation<T>, closed_loop: &ClosedLoop) -> T
where
    T: TransportNumeric,
{
    let theta = closed_loop
        .decrease_cells()
        .map(|cell| allocation.get(cell))
        .fold(T::infinity(), T::min);

    for (position, &cell) in closed_loop.cells().iter().enumerate() {
        let quantity = allocation.get(cell);
        let updated = if position % 2 == 0 {
            quantity + theta
        } else {
            snap_zero(quantity - theta)
        };
        allocation.set(cell, updated);
    }

    theta
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Non-degenerate 3x3 basis from the northwest-corner walk:
    /// 20 . . / 10 20 . / . 20 30
    fn basis() -> Allocation<f64> {
        Allocation::from_rows(vec![
            vec![20.0, 0.0, 0.0],
            vec![10.0, 20.0, 0.0],
            vec![0.0, 20.0, 30.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_loop_found_for_adjacent_cell() {
        let allocation = basis();
        let closed_loop = find_loop(&allocation, Cell::at(0, 1)).unwrap();

        assert_eq!(closed_loop.entering(), Cell::at(0, 1));
        assert_eq!(
            closed_loop.cells(),
            &[Cell::at(0, 1), Cell::at(0, 0), Cell::at(1, 0), Cell::at(1, 1)]
        );
    }

    #[test]
    fn test_loop_exists_for_every_non_basic_cell() {
        let allocation = basis();
        for i in 0..3 {
            for j in 0..3 {
                let cell = Cell::at(i, j);
                if allocation.is_basic(cell) {
                    continue;
                }
                let closed_loop = find_loop(&allocation, cell)
                    .unwrap_or_else(|| panic!("no loop for {:?}", cell));
                assert!(closed_loop.cells().len() >= 4);
                assert_eq!(closed_loop.cells().len() % 2, 0);
            }
        }
    }

    #[test]
    fn test_loop_alternates_rows_and_columns() {
        let allocation = basis();
        let closed_loop = find_loop(&allocation, Cell::at(2, 0)).unwrap();

        let cells = closed_loop.cells();
        for window in cells.windows(2).enumerate() {
            let (k, pair) = window;
            if k % 2 == 0 {
                // Horizontal move: same origin.
                assert_eq!(pair[0].origin, pair[1].origin);
            } else {
                assert_eq!(pair[0].destination, pair[1].destination);
            }
        }
        // Closing edge back to the entering cell is vertical.
        assert_eq!(cells[cells.len() - 1].destination, cells[0].destination);
    }

    #[test]
    fn test_apply_loop_preserves_marginals() {
        let mut allocation = basis();
        let row_totals: Vec<f64> = (0..3).map(|i| allocation.row_total(i.into())).collect();
        let col_totals: Vec<f64> = (0..3).map(|j| allocation.column_total(j.into())).collect();

        let closed_loop = find_loop(&allocation, Cell::at(0, 1)).unwrap();
        let theta = apply_loop(&mut allocation, &closed_loop);
        assert_eq!(theta, 20.0);

        for i in 0..3 {
            assert_eq!(allocation.row_total(i.into()), row_totals[i]);
        }
        for j in 0..3 {
            assert_eq!(allocation.column_total(j.into()), col_totals[j]);
        }
    }

    #[test]
    fn test_apply_loop_zeroes_a_leaving_cell() {
        let mut allocation = basis();
        let closed_loop = find_loop(&allocation, Cell::at(0, 1)).unwrap();
        apply_loop(&mut allocation, &closed_loop);

        // Theta was the quantity at (1, 1); that cell leaves the basis.
        assert_eq!(allocation.get(Cell::at(1, 1)), 0.0);
        assert!(!allocation.is_basic(Cell::at(1, 1)));
        assert_eq!(allocation.get(Cell::at(0, 1)), 20.0);
    }

    #[test]
    fn test_no_loop_on_degenerate_basis() {
        // A single basic cell cannot host any alternating loop.
        let allocation = Allocation::from_rows(vec![
            vec![5.0, 0.0],
            vec![0.0, 0.0],
        ])
        .unwrap();
        assert!(find_loop(&allocation, Cell::at(1, 1)).is_none());
    }
}

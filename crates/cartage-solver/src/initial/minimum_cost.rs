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

use crate::{
    initial::{InitialSolution, InitialSolutionBuilder},
    num::TransportNumeric,
    state::BuilderState,
};
use cartage_model::{
    index::{Cell, DestinationIndex, OriginIndex},
    problem::Problem,
};
use fixedbitset::FixedBitSet;

/// The **Minimum-Cost** builder: always allocate to the globally cheapest
/// cell whose row and column are both still open.
///
/// All cells are sorted once by `(cost, row, column)` up front; after every
/// allocation the scan restarts from the top of that list, skipping cells
/// whose row or column has closed. The stable row-major tie-break makes the
/// trace deterministic for instances with repeated costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumCost;

impl<T> InitialSolutionBuilder<T> for MinimumCost
where
    T: TransportNumeric,
{
    fn name(&self) -> &'static str {
        "minimum-cost"
    }

    fn build(&self, problem: &Problem<T>) -> InitialSolution<T> {
        let num_origins = problem.num_origins();
        let num_destinations = problem.num_destinations();
        let mut state = BuilderState::new(problem);

        let mut ordered: Vec<(T, usize, usize)> = Vec::with_capacity(num_origins * num_destinations);
        for i in 0..num_origins {
            for j in 0..num_destinations {
                ordered.push((problem.cost(Cell::at(i, j)), i, j));
            }
        }
        // Row-major order already; a stable sort on cost alone keeps the
        // (row, column) tie-break.
        ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut closed_rows = FixedBitSet::with_capacity(num_origins);
        let mut closed_cols = FixedBitSet::with_capacity(num_destinations);

        'outer: while state.any_supply_open() && state.any_demand_open() {
            for &(_, i, j) in &ordered {
                if closed_rows.contains(i) || closed_cols.contains(j) {
                    continue;
                }

                state.allocate(problem, Cell::at(i, j));
                if !state.supply_open(OriginIndex::new(i)) {
                    closed_rows.insert(i);
                }
                if !state.demand_open(DestinationIndex::new(j)) {
                    closed_cols.insert(j);
                }
                continue 'outer;
            }
            break;
        }

        state.finish()
    }
}

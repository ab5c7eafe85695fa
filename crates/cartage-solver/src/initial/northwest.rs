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

/// The **Northwest-Corner** builder: a single greedy pass that starts at
/// the top-left cell and walks the tableau.
///
/// At each cursor position `(i, j)` it allocates the feasible maximum
/// `min(remaining_supply[i], remaining_demand[j])`, then advances: down a
/// row when the origin is exhausted, right a column when the destination
/// is exhausted, diagonally when both close at once. Costs play no role
/// in the choice, which makes the method fast and its trace short: at
/// most `m + n - 1` steps, exactly one per allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NorthwestCorner;

impl<T> InitialSolutionBuilder<T> for NorthwestCorner
where
    T: TransportNumeric,
{
    fn name(&self) -> &'static str {
        "northwest-corner"
    }

    fn build(&self, problem: &Problem<T>) -> InitialSolution<T> {
        let num_origins = problem.num_origins();
        let num_destinations = problem.num_destinations();
        let mut state = BuilderState::new(problem);

        let mut i = 0;
        let mut j = 0;
        while i < num_origins && j < num_destinations {
            state.allocate(problem, Cell::at(i, j));

            let supply_done = !state.supply_open(OriginIndex::new(i));
            let demand_done = !state.demand_open(DestinationIndex::new(j));

            if supply_done && i + 1 < num_origins {
                i += 1;
            } else if demand_done && j + 1 < num_destinations {
                j += 1;
            } else if supply_done && demand_done {
                i += 1;
                j += 1;
            } else {
                break;
            }
        }

        state.finish()
    }
}

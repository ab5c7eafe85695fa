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

//! # Builder State
//!
//! The mutable bookkeeping every initial-solution builder shares: working
//! copies of the supply and demand vectors, the allocation tableau under
//! construction, and the step trace. The caller's problem is never
//! mutated; all consumption happens on the copies owned here.
//!
//! Residuals that fall inside the float tolerance are snapped to exactly
//! zero on every update, so "row exhausted" and "column exhausted" remain
//! crisp predicates for the cursor/penalty/scan logic of the builders.

use crate::{initial::InitialSolution, num::TransportNumeric};
use cartage_core::num::approx::{definitely_positive, snap_zero};
use cartage_model::{
    allocation::Allocation,
    index::{Cell, DestinationIndex, OriginIndex},
    problem::Problem,
    trace::{Step, StepEvent},
};

/// Mutable state of one builder run.
pub struct BuilderState<T> {
    allocation: Allocation<T>,
    remaining_supply: Vec<T>,
    remaining_demand: Vec<T>,
    steps: Vec<Step<T>>,
}

impl<T> BuilderState<T>
where
    T: TransportNumeric,
{
    /// Creates fresh state for the given problem, copying its marginals.
    pub fn new(problem: &Problem<T>) -> Self {
        Self {
            allocation: Allocation::zeroed(problem.num_origins(), problem.num_destinations()),
            remaining_supply: problem.supply().to_vec(),
            remaining_demand: problem.demand().to_vec(),
            steps: Vec::new(),
        }
    }

    /// Returns the unshipped capacity of one origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is out of bounds.
    #[inline]
    pub fn remaining_supply(&self, origin: OriginIndex) -> T {
        let index = origin.get();
        debug_assert!(
            index < self.remaining_supply.len(),
            "called `BuilderState::remaining_supply` with origin index out of bounds: the len is {} but the index is {}",
            self.remaining_supply.len(),
            index
        );

        self.remaining_supply[index]
    }

    /// Returns the unsatisfied requirement of one destination.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is out of bounds.
    #[inline]
    pub fn remaining_demand(&self, destination: DestinationIndex) -> T {
        let index = destination.get();
        debug_assert!(
            index < self.remaining_demand.len(),
            "called `BuilderState::remaining_demand` with destination index out of bounds: the len is {} but the index is {}",
            self.remaining_demand.len(),
            index
        );

        self.remaining_demand[index]
    }

    /// Returns `true` while the origin still has supply above tolerance.
    #[inline]
    pub fn supply_open(&self, origin: OriginIndex) -> bool {
        definitely_positive(self.remaining_supply(origin))
    }

    /// Returns `true` while the destination still has demand above tolerance.
    #[inline]
    pub fn demand_open(&self, destination: DestinationIndex) -> bool {
        definitely_positive(self.remaining_demand(destination))
    }

    /// Returns `true` if any origin still has supply above tolerance.
    #[inline]
    pub fn any_supply_open(&self) -> bool {
        (0..self.remaining_supply.len()).any(|i| self.supply_open(OriginIndex::new(i)))
    }

    /// Returns `true` if any destination still has demand above tolerance.
    #[inline]
    pub fn any_demand_open(&self) -> bool {
        (0..self.remaining_demand.len()).any(|j| self.demand_open(DestinationIndex::new(j)))
    }

    /// Allocates `min(remaining_supply, remaining_demand)` to `cell`,
    /// updates both residuals, and emits an `Allocated` step with a deep
    /// copy of the tableau. Returns the amount placed.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate of `cell` is out of bounds.
    pub fn allocate(&mut self, problem: &Problem<T>, cell: Cell) -> T {
        let i = cell.origin.get();
        let j = cell.destination.get();
        let amount = self.remaining_supply[i].min(self.remaining_demand[j]);

        let placed = self.allocation.get(cell) + amount;
        self.allocation.set(cell, placed);
        self.remaining_supply[i] = snap_zero(self.remaining_supply[i] - amount);
        self.remaining_demand[j] = snap_zero(self.remaining_demand[j] - amount);

        self.steps.push(Step::new(
            self.allocation.clone(),
            StepEvent::Allocated {
                cell,
                amount,
                unit_cost: problem.cost(cell),
            },
        ));

        amount
    }

    /// Consumes the state, yielding the finished allocation and its trace.
    #[inline]
    pub fn finish(self) -> InitialSolution<T> {
        InitialSolution::new(self.allocation, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> Problem<f64> {
        Problem::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![5.0, 5.0],
            vec![7.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_allocate_consumes_residuals() {
        let p = problem();
        let mut state = BuilderState::new(&p);

        let amount = state.allocate(&p, Cell::at(0, 0));
        assert_eq!(amount, 5.0);
        assert_eq!(state.remaining_supply(OriginIndex::new(0)), 0.0);
        assert_eq!(state.remaining_demand(DestinationIndex::new(0)), 2.0);
        assert!(!state.supply_open(OriginIndex::new(0)));
        assert!(state.demand_open(DestinationIndex::new(0)));
    }

    #[test]
    fn test_allocate_emits_one_step_per_call() {
        let p = problem();
        let mut state = BuilderState::new(&p);
        state.allocate(&p, Cell::at(0, 0));
        state.allocate(&p, Cell::at(1, 0));

        let solution = state.finish();
        assert_eq!(solution.steps().len(), 2);
        assert_eq!(solution.allocation().get(Cell::at(0, 0)), 5.0);
        assert_eq!(solution.allocation().get(Cell::at(1, 0)), 2.0);
    }

    #[test]
    fn test_step_snapshots_are_deep_copies() {
        let p = problem();
        let mut state = BuilderState::new(&p);
        state.allocate(&p, Cell::at(0, 0));
        state.allocate(&p, Cell::at(1, 0));

        let solution = state.finish();
        // First snapshot shows only the first allocation.
        assert_eq!(solution.steps()[0].allocation().get(Cell::at(1, 0)), 0.0);
        assert_eq!(solution.steps()[1].allocation().get(Cell::at(1, 0)), 2.0);
    }
}

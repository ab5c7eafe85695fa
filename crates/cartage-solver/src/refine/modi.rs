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
    loops::{apply_loop, find_loop},
    num::TransportNumeric,
    refine::{ensure_non_degenerate, RefineError, Refinement, Refiner},
};
use cartage_core::num::approx::definitely_negative;
use cartage_model::{
    allocation::Allocation,
    index::Cell,
    problem::Problem,
    trace::{Step, StepEvent},
};

/// Dual potentials of a basis: one value per origin row and destination
/// column, fixed by `u[0] = 0` and `u[i] + v[j] = cost[i][j]` on every
/// basic cell.
struct Potentials<T> {
    u: Vec<T>,
    v: Vec<T>,
}

impl<T> Potentials<T>
where
    T: TransportNumeric,
{
    /// Propagates potentials over the basic cells until a fixpoint.
    ///
    /// Returns `None` when some potential stays undetermined, i.e. the
    /// basic cells do not connect every row and column to row 0.
    fn solve(problem: &Problem<T>, allocation: &Allocation<T>) -> Option<Self> {
        let num_origins = problem.num_origins();
        let num_destinations = problem.num_destinations();
        let basic = allocation.basic_cells();

        let mut u: Vec<Option<T>> = vec![None; num_origins];
        let mut v: Vec<Option<T>> = vec![None; num_destinations];
        u[0] = Some(T::zero());

        loop {
            let mut changed = false;
            for &cell in &basic {
                let i = cell.origin.get();
                let j = cell.destination.get();
                let cost = problem.cost(cell);
                match (u[i], v[j]) {
                    (Some(ui), None) => {
                        v[j] = Some(cost - ui);
                        changed = true;
                    }
                    (None, Some(vj)) => {
                        u[i] = Some(cost - vj);
                        changed = true;
                    }
                    _ => {}
                }
            }
            if !changed {
                break;
            }
        }

        Some(Self {
            u: u.into_iter().collect::<Option<Vec<T>>>()?,
            v: v.into_iter().collect::<Option<Vec<T>>>()?,
        })
    }

    /// Reduced cost of one cell: `cost[i][j] - u[i] - v[j]`. Zero on basic
    /// cells by construction.
    #[inline]
    fn reduced_cost(&self, problem: &Problem<T>, cell: Cell) -> T {
        problem.cost(cell) - self.u[cell.origin.get()] - self.v[cell.destination.get()]
    }
}

/// The **MODI** (modified-distribution) refiner.
///
/// Instead of walking a loop per candidate like the stepping-stone method,
/// each iteration solves the dual potentials `u`/`v` from the basic cells
/// and prices every non-basic cell with the reduced cost
/// `cost[i][j] - u[i] - v[j]`. Only the single entering cell (the most
/// negative reduced cost, first in row-major order on ties) needs its
/// loop found and applied. Both refiners pivot through the same bases on
/// non-degenerate instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifiedDistribution;

impl<T> Refiner<T> for ModifiedDistribution
where
    T: TransportNumeric,
{
    fn name(&self) -> &'static str {
        "modi-refinement"
    }

    fn refine(
        &self,
        problem: &Problem<T>,
        mut allocation: Allocation<T>,
    ) -> Result<Refinement<T>, RefineError> {
        let costs = problem.costs();
        let expected = problem.num_origins() + problem.num_destinations() - 1;
        let mut steps = vec![Step::new(
            allocation.clone(),
            StepEvent::InitialCost {
                total_cost: allocation.total_cost(costs),
            },
        )];

        loop {
            ensure_non_degenerate(problem, &allocation)?;

            let potentials = Potentials::solve(problem, &allocation).ok_or(
                RefineError::Degenerate {
                    found: allocation.num_basic(),
                    expected,
                },
            )?;

            let mut entering: Option<(T, Cell)> = None;
            for i in 0..problem.num_origins() {
                for j in 0..problem.num_destinations() {
                    let cell = Cell::at(i, j);
                    if allocation.is_basic(cell) {
                        continue;
                    }
                    let delta = potentials.reduced_cost(problem, cell);
                    if !definitely_negative(delta) {
                        continue;
                    }
                    match entering {
                        Some((best, _)) if delta >= best => {}
                        _ => entering = Some((delta, cell)),
                    }
                }
            }

            match entering {
                None => {
                    steps.push(Step::new(
                        allocation.clone(),
                        StepEvent::OptimalReached {
                            total_cost: allocation.total_cost(costs),
                        },
                    ));
                    return Ok(Refinement::new(allocation, steps));
                }
                Some((_, cell)) => {
                    let closed_loop = find_loop(&allocation, cell)
                        .ok_or(RefineError::LoopNotFound { cell })?;
                    let shifted = apply_loop(&mut allocation, &closed_loop);
                    steps.push(Step::new(
                        allocation.clone(),
                        StepEvent::LoopApplied {
                            entering: cell,
                            shifted,
                            total_cost: allocation.total_cost(costs),
                        },
                    ));
                }
            }
        }
    }
}

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
    loops::{apply_loop, find_loop, ClosedLoop},
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

/// The **Stepping-Stone** refiner.
///
/// Each iteration walks the closed loop of every non-basic cell and sums
/// the unit costs around it with alternating signs. A negative sum means
/// shifting one unit into that cell lowers the objective; the most
/// negative candidate enters (first in row-major order on ties), the loop
/// is applied, and the iteration repeats until no candidate is negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteppingStone;

impl SteppingStone {
    /// Opportunity cost of entering at the loop's first cell: the
    /// alternating-sign sum of unit costs around the loop.
    fn opportunity_cost<T>(problem: &Problem<T>, closed_loop: &ClosedLoop) -> T
    where
        T: TransportNumeric,
    {
        closed_loop
            .cells()
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (position, &cell)| {
                let cost = problem.cost(cell);
                if position % 2 == 0 {
                    acc + cost
                } else {
                    acc - cost
                }
            })
    }
}

impl<T> Refiner<T> for SteppingStone
where
    T: TransportNumeric,
{
    fn name(&self) -> &'static str {
        "stepping-stone-refinement"
    }

    fn refine(
        &self,
        problem: &Problem<T>,
        mut allocation: Allocation<T>,
    ) -> Result<Refinement<T>, RefineError> {
        let costs = problem.costs();
        let mut steps = vec![Step::new(
            allocation.clone(),
            StepEvent::InitialCost {
                total_cost: allocation.total_cost(costs),
            },
        )];

        loop {
            ensure_non_degenerate(problem, &allocation)?;

            let mut best: Option<(T, ClosedLoop)> = None;
            for i in 0..problem.num_origins() {
                for j in 0..problem.num_destinations() {
                    let cell = Cell::at(i, j);
                    if allocation.is_basic(cell) {
                        continue;
                    }

                    let closed_loop = find_loop(&allocation, cell)
                        .ok_or(RefineError::LoopNotFound { cell })?;
                    let delta = Self::opportunity_cost(problem, &closed_loop);
                    if !definitely_negative(delta) {
                        continue;
                    }
                    match &best {
                        Some((best_delta, _)) if delta >= *best_delta => {}
                        _ => best = Some((delta, closed_loop)),
                    }
                }
            }

            match best {
                None => {
                    steps.push(Step::new(
                        allocation.clone(),
                        StepEvent::OptimalReached {
                            total_cost: allocation.total_cost(costs),
                        },
                    ));
                    return Ok(Refinement::new(allocation, steps));
                }
                Some((_, closed_loop)) => {
                    let shifted = apply_loop(&mut allocation, &closed_loop);
                    steps.push(Step::new(
                        allocation.clone(),
                        StepEvent::LoopApplied {
                            entering: closed_loop.entering(),
                            shifted,
                            total_cost: allocation.total_cost(costs),
                        },
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::{northwest::NorthwestCorner, InitialSolutionBuilder};

    /// Northwest-corner on this instance starts at 185; two pivots reach
    /// the optimum of 100.
    fn improvable_problem() -> Problem<f64> {
        Problem::new(
            vec![vec![4.0, 1.0, 3.0], vec![2.0, 5.0, 6.0]],
            vec![30.0, 20.0],
            vec![15.0, 25.0, 10.0],
        )
        .unwrap()
    }

    /// Northwest-corner on this instance is already optimal at 390.
    fn optimal_from_start_problem() -> Problem<f64> {
        Problem::new(
            vec![
                vec![4.0, 6.0, 8.0],
                vec![5.0, 4.0, 7.0],
                vec![6.0, 3.0, 4.0],
            ],
            vec![20.0, 30.0, 50.0],
            vec![30.0, 40.0, 30.0],
        )
        .unwrap()
    }

    #[test]
    fn test_reaches_known_optimum() {
        let problem = improvable_problem();
        let (start, _) = NorthwestCorner.build(&problem).into_parts();
        let refinement = SteppingStone.refine(&problem, start).unwrap();

        assert_eq!(refinement.allocation().total_cost(problem.costs()), 100.0);
        assert!(refinement.allocation().satisfies(&problem));
    }

    #[test]
    fn test_cost_is_monotonically_non_increasing() {
        let problem = improvable_problem();
        let (start, _) = NorthwestCorner.build(&problem).into_parts();
        let refinement = SteppingStone.refine(&problem, start).unwrap();

        let costs: Vec<f64> = refinement
            .steps()
            .iter()
            .map(|step| step.allocation().total_cost(problem.costs()))
            .collect();
        assert!(costs.windows(2).all(|pair| pair[1] <= pair[0]));
        assert_eq!(costs[0], 185.0);
        assert_eq!(*costs.last().unwrap(), 100.0);
    }

    #[test]
    fn test_trace_is_bracketed_by_cost_events() {
        let problem = improvable_problem();
        let (start, _) = NorthwestCorner.build(&problem).into_parts();
        let refinement = SteppingStone.refine(&problem, start).unwrap();

        let steps = refinement.steps();
        assert!(matches!(steps[0].event(), StepEvent::InitialCost { .. }));
        assert!(matches!(
            steps[steps.len() - 1].event(),
            StepEvent::OptimalReached { .. }
        ));
        for step in &steps[1..steps.len() - 1] {
            assert!(matches!(step.event(), StepEvent::LoopApplied { .. }));
        }
    }

    #[test]
    fn test_already_optimal_input_yields_two_steps() {
        let problem = optimal_from_start_problem();
        let (start, _) = NorthwestCorner.build(&problem).into_parts();
        let refinement = SteppingStone.refine(&problem, start).unwrap();

        assert_eq!(refinement.steps().len(), 2);
        assert_eq!(
            refinement.steps()[0].allocation(),
            refinement.steps()[1].allocation()
        );
        assert_eq!(refinement.allocation().total_cost(problem.costs()), 390.0);
    }

    #[test]
    fn test_refinement_is_idempotent() {
        let problem = improvable_problem();
        let (start, _) = NorthwestCorner.build(&problem).into_parts();
        let (refined, _) = SteppingStone.refine(&problem, start).unwrap().into_parts();

        let again = SteppingStone.refine(&problem, refined.clone()).unwrap();
        assert_eq!(again.steps().len(), 2);
        assert_eq!(*again.allocation(), refined);
    }

    #[test]
    fn test_degenerate_input_is_rejected() {
        let problem = Problem::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![5.0, 5.0],
            vec![5.0, 5.0],
        )
        .unwrap();
        let degenerate =
            Allocation::from_rows(vec![vec![5.0, 0.0], vec![0.0, 5.0]]).unwrap();

        assert_eq!(
            SteppingStone.refine(&problem, degenerate).unwrap_err(),
            RefineError::Degenerate {
                found: 2,
                expected: 3
            }
        );
    }
}

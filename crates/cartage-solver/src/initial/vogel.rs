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

/// Penalty of one tableau line: the gap between its two cheapest eligible
/// costs, the single cost when only one eligible cell remains, `None` when
/// the line is out of the running.
fn line_penalty<T, I>(costs: I) -> Option<T>
where
    T: TransportNumeric,
    I: Iterator<Item = T>,
{
    let mut cheapest: Option<T> = None;
    let mut second: Option<T> = None;
    for cost in costs {
        match cheapest {
            Some(best) if cost < best => {
                second = cheapest;
                cheapest = Some(cost);
            }
            Some(_) => match second {
                Some(next) if cost < next => second = Some(cost),
                Some(_) => {}
                None => second = Some(cost),
            },
            None => cheapest = Some(cost),
        }
    }

    match (cheapest, second) {
        (Some(best), Some(next)) => Some(next - best),
        (Some(best), None) => Some(best),
        (None, _) => None,
    }
}

/// Index of the maximum defined penalty; first occurrence wins on ties.
fn max_penalty<T>(penalties: &[Option<T>]) -> Option<(usize, T)>
where
    T: TransportNumeric,
{
    let mut best: Option<(usize, T)> = None;
    for (index, penalty) in penalties.iter().enumerate() {
        if let Some(p) = penalty {
            match best {
                Some((_, b)) if *p <= b => {}
                _ => best = Some((index, *p)),
            }
        }
    }
    best
}

/// **Vogel's Approximation** builder: penalty-guided greedy allocation.
///
/// Each round scores every open row and column by how much it would hurt
/// to miss its cheapest cell (the difference between its two smallest
/// eligible costs), picks the line with the highest penalty (rows win
/// ties against columns), and allocates the feasible maximum to the
/// cheapest eligible cell of that line. A line's penalty is defined only
/// while its own remaining quantity is positive and at least one opposite
/// line is still open.
#[derive(Debug, Clone, Copy, Default)]
pub struct VogelApproximation;

impl<T> InitialSolutionBuilder<T> for VogelApproximation
where
    T: TransportNumeric,
{
    fn name(&self) -> &'static str {
        "vogel"
    }

    fn build(&self, problem: &Problem<T>) -> InitialSolution<T> {
        let num_origins = problem.num_origins();
        let num_destinations = problem.num_destinations();
        let mut state = BuilderState::new(problem);

        while state.any_supply_open() && state.any_demand_open() {
            let row_penalties: Vec<Option<T>> = (0..num_origins)
                .map(|i| {
                    if !state.supply_open(OriginIndex::new(i)) {
                        return None;
                    }
                    line_penalty((0..num_destinations).filter_map(|j| {
                        state
                            .demand_open(DestinationIndex::new(j))
                            .then(|| problem.cost(Cell::at(i, j)))
                    }))
                })
                .collect();

            let col_penalties: Vec<Option<T>> = (0..num_destinations)
                .map(|j| {
                    if !state.demand_open(DestinationIndex::new(j)) {
                        return None;
                    }
                    line_penalty((0..num_origins).filter_map(|i| {
                        state
                            .supply_open(OriginIndex::new(i))
                            .then(|| problem.cost(Cell::at(i, j)))
                    }))
                })
                .collect();

            let best_row = max_penalty(&row_penalties);
            let best_col = max_penalty(&col_penalties);

            // Row wins ties against column.
            let cell = match (best_row, best_col) {
                (None, None) => break,
                (Some((i, _)), None) => cheapest_in_row(problem, &state, i),
                (None, Some((j, _))) => cheapest_in_col(problem, &state, j),
                (Some((i, rp)), Some((j, cp))) => {
                    if rp >= cp {
                        cheapest_in_row(problem, &state, i)
                    } else {
                        cheapest_in_col(problem, &state, j)
                    }
                }
            };

            match cell {
                Some(cell) => {
                    state.allocate(problem, cell);
                }
                None => break,
            }
        }

        state.finish()
    }
}

/// Cheapest open-demand cell of row `i`; first occurrence wins on ties.
fn cheapest_in_row<T>(problem: &Problem<T>, state: &BuilderState<T>, i: usize) -> Option<Cell>
where
    T: TransportNumeric,
{
    let mut best: Option<(T, Cell)> = None;
    for j in 0..problem.num_destinations() {
        if !state.demand_open(DestinationIndex::new(j)) {
            continue;
        }
        let cell = Cell::at(i, j);
        let cost = problem.cost(cell);
        match best {
            Some((b, _)) if cost >= b => {}
            _ => best = Some((cost, cell)),
        }
    }
    best.map(|(_, cell)| cell)
}

/// Cheapest open-supply cell of column `j`; first occurrence wins on ties.
fn cheapest_in_col<T>(problem: &Problem<T>, state: &BuilderState<T>, j: usize) -> Option<Cell>
where
    T: TransportNumeric,
{
    let mut best: Option<(T, Cell)> = None;
    for i in 0..problem.num_origins() {
        if !state.supply_open(OriginIndex::new(i)) {
            continue;
        }
        let cell = Cell::at(i, j);
        let cost = problem.cost(cell);
        match best {
            Some((b, _)) if cost >= b => {}
            _ => best = Some((cost, cell)),
        }
    }
    best.map(|(_, cell)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_problem() -> Problem<f64> {
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
    fn test_line_penalty_rules() {
        assert_eq!(line_penalty::<f64, _>([4.0, 6.0, 8.0].into_iter()), Some(2.0));
        assert_eq!(line_penalty::<f64, _>([7.0].into_iter()), Some(7.0));
        assert_eq!(line_penalty::<f64, _>(std::iter::empty()), None);
        // Duplicate minima give a zero penalty.
        assert_eq!(line_penalty::<f64, _>([3.0, 3.0, 9.0].into_iter()), Some(0.0));
    }

    #[test]
    fn test_max_penalty_prefers_first_index_on_ties() {
        let penalties = vec![Some(2.0), None, Some(2.0), Some(1.0)];
        assert_eq!(max_penalty(&penalties), Some((0, 2.0)));
        assert_eq!(max_penalty::<f64>(&[None, None]), None);
    }

    #[test]
    fn test_final_allocation_satisfies_marginals() {
        let problem = scenario_problem();
        let solution = VogelApproximation.build(&problem);
        assert!(solution.allocation().satisfies(&problem));
    }

    #[test]
    fn test_not_worse_than_northwest_corner() {
        use crate::initial::northwest::NorthwestCorner;

        let problem = scenario_problem();
        let vogel = VogelApproximation.build(&problem);
        let northwest = NorthwestCorner.build(&problem);
        let costs = problem.costs();
        assert!(vogel.allocation().total_cost(costs) <= northwest.allocation().total_cost(costs));
    }

    #[test]
    fn test_every_snapshot_is_non_negative() {
        let problem = scenario_problem();
        let solution = VogelApproximation.build(&problem);
        for step in solution.steps() {
            assert!(step.allocation().quantities().values().iter().all(|&q| q >= 0.0));
        }
    }

    #[test]
    fn test_single_cell_boundary() {
        let problem = Problem::new(vec![vec![3.0]], vec![7.0], vec![7.0]).unwrap();
        let solution = VogelApproximation.build(&problem);
        assert_eq!(solution.steps().len(), 1);
        assert_eq!(solution.allocation().get(Cell::at(0, 0)), 7.0);
    }
}

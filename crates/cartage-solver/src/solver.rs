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

//! # Solve Orchestration
//!
//! The high-level entry point tying the layers together: balance the
//! instance once, run the selected method, and hand back a report owning
//! the balanced problem, the final allocation, and the full step trace.
//!
//! ## Usage
//!
//! ```rust
//! use cartage_model::problem::Problem;
//! use cartage_solver::solver::{solve, Method, SolveOptions};
//!
//! let problem = Problem::new(
//!     vec![vec![4.0, 1.0, 3.0], vec![2.0, 5.0, 6.0]],
//!     vec![30.0, 20.0],
//!     vec![15.0, 25.0, 10.0],
//! ).unwrap();
//!
//! let report = solve(problem, Method::Modi, SolveOptions::default()).unwrap();
//! assert_eq!(report.total_cost(), 100.0);
//! ```

use crate::{
    initial::{
        minimum_cost::MinimumCost, northwest::NorthwestCorner, vogel::VogelApproximation,
        InitialSolutionBuilder,
    },
    num::TransportNumeric,
    refine::{modi::ModifiedDistribution, stepping_stone::SteppingStone, RefineError, Refiner},
};
use cartage_model::{
    allocation::Allocation,
    problem::{BalanceAdjustment, BalancePolicy, Problem, ProblemError},
    trace::Step,
};

/// The solution method to run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    /// Northwest-corner initial solution, no refinement.
    NorthwestCorner,
    /// Vogel's-approximation initial solution, no refinement.
    VogelApproximation,
    /// Minimum-cost initial solution, no refinement.
    MinimumCost,
    /// Northwest-corner start refined by the stepping-stone method.
    SteppingStone,
    /// Northwest-corner start refined by the MODI method.
    Modi,
}

impl Method {
    /// All methods in display order.
    pub const ALL: [Method; 5] = [
        Method::NorthwestCorner,
        Method::VogelApproximation,
        Method::MinimumCost,
        Method::SteppingStone,
        Method::Modi,
    ];

    /// Stable machine-readable name, also accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Method::NorthwestCorner => "northwest-corner",
            Method::VogelApproximation => "vogel",
            Method::MinimumCost => "minimum-cost",
            Method::SteppingStone => "stepping-stone-refinement",
            Method::Modi => "modi-refinement",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The error type for parsing a `Method` from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMethodError {
    /// The rejected input.
    pub input: String,
}

impl std::fmt::Display for ParseMethodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown method name: {:?}", self.input)
    }
}

impl std::error::Error for ParseMethodError {}

impl std::str::FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|method| method.name() == s)
            .ok_or_else(|| ParseMethodError {
                input: s.to_string(),
            })
    }
}

/// Options controlling one solve.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SolveOptions {
    auto_balance: bool,
}

impl SolveOptions {
    /// Creates the default options: auto-balancing enabled.
    #[inline]
    pub fn new() -> Self {
        Self { auto_balance: true }
    }

    /// Sets whether imbalanced instances are augmented with a zero-cost
    /// dummy line (`true`) or rejected (`false`).
    #[inline]
    pub fn with_auto_balance(mut self, auto_balance: bool) -> Self {
        self.auto_balance = auto_balance;
        self
    }

    /// Returns the balance policy these options select.
    #[inline]
    pub fn balance_policy(&self) -> BalancePolicy {
        if self.auto_balance {
            BalancePolicy::AutoBalance
        } else {
            BalancePolicy::Strict
        }
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The error type for `solve`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Validation or balancing of the instance failed.
    Problem(ProblemError),
    /// A refinement strategy failed.
    Refine(RefineError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Problem(e) => write!(f, "problem error: {}", e),
            SolveError::Refine(e) => write!(f, "refinement error: {}", e),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Problem(e) => Some(e),
            SolveError::Refine(e) => Some(e),
        }
    }
}

impl From<ProblemError> for SolveError {
    fn from(e: ProblemError) -> Self {
        SolveError::Problem(e)
    }
}

impl From<RefineError> for SolveError {
    fn from(e: RefineError) -> Self {
        SolveError::Refine(e)
    }
}

/// The owned outcome of one solve.
pub struct SolveReport<T> {
    method: Method,
    problem: Problem<T>,
    allocation: Allocation<T>,
    steps: Vec<Step<T>>,
    adjustment: Option<BalanceAdjustment<T>>,
}

impl<T> SolveReport<T>
where
    T: TransportNumeric,
{
    /// Returns the method that produced this report.
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the balanced problem the solve ran on. May have one more
    /// origin or destination than the caller's input.
    #[inline]
    pub fn problem(&self) -> &Problem<T> {
        &self.problem
    }

    /// Returns the final allocation.
    #[inline]
    pub fn allocation(&self) -> &Allocation<T> {
        &self.allocation
    }

    /// Returns the full ordered step trace, builder steps first.
    #[inline]
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// Returns the balance augmentation applied before solving, if any.
    #[inline]
    pub fn adjustment(&self) -> Option<&BalanceAdjustment<T>> {
        self.adjustment.as_ref()
    }

    /// Evaluates the objective of the final allocation.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.allocation.total_cost(self.problem.costs())
    }
}

impl<T> std::fmt::Display for SolveReport<T>
where
    T: TransportNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Method:     {}", self.method)?;
        writeln!(
            f,
            "Problem:    {} origins x {} destinations",
            self.problem.num_origins(),
            self.problem.num_destinations()
        )?;
        match &self.adjustment {
            Some(BalanceAdjustment::DummyOrigin { supply }) => {
                writeln!(f, "Balancing:  dummy origin with supply {}", supply)?;
            }
            Some(BalanceAdjustment::DummyDestination { demand }) => {
                writeln!(f, "Balancing:  dummy destination with demand {}", demand)?;
            }
            None => {}
        }
        writeln!(f, "Steps:      {}", self.steps.len())?;
        writeln!(f, "Total cost: {}", self.total_cost())?;
        writeln!(f, "Allocation:")?;
        write!(f, "{}", self.allocation)
    }
}

/// Balances `problem` under the options' policy and runs `method` on it.
///
/// Builder methods return the initial solution as-is; refinement methods
/// seed themselves with the northwest-corner builder and append their own
/// steps to the builder's trace.
///
/// # Errors
///
/// - `SolveError::Problem` when the instance is imbalanced and
///   auto-balancing is disabled.
/// - `SolveError::Refine` when a refiner encounters a degenerate tableau
///   or cannot close a loop.
pub fn solve<T>(
    problem: Problem<T>,
    method: Method,
    options: SolveOptions,
) -> Result<SolveReport<T>, SolveError>
where
    T: TransportNumeric,
{
    let (problem, adjustment) = problem.balanced(options.balance_policy())?;

    let (allocation, steps) = match method {
        Method::NorthwestCorner => NorthwestCorner.build(&problem).into_parts(),
        Method::VogelApproximation => VogelApproximation.build(&problem).into_parts(),
        Method::MinimumCost => MinimumCost.build(&problem).into_parts(),
        Method::SteppingStone => refine_from_northwest(&problem, &SteppingStone)?,
        Method::Modi => refine_from_northwest(&problem, &ModifiedDistribution)?,
    };

    Ok(SolveReport {
        method,
        problem,
        allocation,
        steps,
        adjustment,
    })
}

fn refine_from_northwest<T, R>(
    problem: &Problem<T>,
    refiner: &R,
) -> Result<(Allocation<T>, Vec<Step<T>>), SolveError>
where
    T: TransportNumeric,
    R: Refiner<T>,
{
    let (start, mut steps) = NorthwestCorner.build(problem).into_parts();
    let (allocation, refine_steps) = refiner.refine(problem, start)?.into_parts();
    steps.extend(refine_steps);
    Ok((allocation, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartage_model::trace::StepEvent;

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

    fn improvable_problem() -> Problem<f64> {
        Problem::new(
            vec![vec![4.0, 1.0, 3.0], vec![2.0, 5.0, 6.0]],
            vec![30.0, 20.0],
            vec![15.0, 25.0, 10.0],
        )
        .unwrap()
    }

    #[test]
    fn test_method_names_round_trip() {
        for method in Method::ALL {
            assert_eq!(method.name().parse::<Method>().unwrap(), method);
        }
        assert!("simplex".parse::<Method>().is_err());
    }

    #[test]
    fn test_builder_method_reports_initial_solution() {
        let report = solve(
            scenario_problem(),
            Method::NorthwestCorner,
            SolveOptions::default(),
        )
        .unwrap();

        assert_eq!(report.method(), Method::NorthwestCorner);
        assert!(report.allocation().satisfies(report.problem()));
        assert_eq!(report.total_cost(), 390.0);
        assert!(report.adjustment().is_none());
    }

    #[test]
    fn test_refined_cost_never_exceeds_builder_cost() {
        let northwest = solve(
            improvable_problem(),
            Method::NorthwestCorner,
            SolveOptions::default(),
        )
        .unwrap();
        let modi = solve(improvable_problem(), Method::Modi, SolveOptions::default()).unwrap();

        assert!(modi.total_cost() <= northwest.total_cost());
        assert_eq!(modi.total_cost(), 100.0);
    }

    #[test]
    fn test_refinement_trace_appends_to_builder_trace() {
        let report = solve(
            improvable_problem(),
            Method::SteppingStone,
            SolveOptions::default(),
        )
        .unwrap();

        let steps = report.steps();
        // Builder steps come first, then the refiner bracket.
        assert!(matches!(steps[0].event(), StepEvent::Allocated { .. }));
        assert!(steps
            .iter()
            .any(|s| matches!(s.event(), StepEvent::InitialCost { .. })));
        assert!(matches!(
            steps[steps.len() - 1].event(),
            StepEvent::OptimalReached { .. }
        ));
    }

    #[test]
    fn test_both_refiners_agree_on_final_cost() {
        let stone = solve(
            improvable_problem(),
            Method::SteppingStone,
            SolveOptions::default(),
        )
        .unwrap();
        let modi = solve(improvable_problem(), Method::Modi, SolveOptions::default()).unwrap();

        assert_eq!(stone.total_cost(), modi.total_cost());
        assert_eq!(stone.allocation(), modi.allocation());
    }

    #[test]
    fn test_auto_balance_augments_the_problem() {
        // Demand surplus of 14: a dummy origin must absorb it.
        let problem = Problem::new(
            vec![vec![4.0, 1.0, 3.0], vec![2.0, 5.0, 6.0]],
            vec![30.0, 20.0],
            vec![24.0, 25.0, 15.0],
        )
        .unwrap();
        let report = solve(problem, Method::Modi, SolveOptions::default()).unwrap();

        assert_eq!(
            report.adjustment(),
            Some(&BalanceAdjustment::DummyOrigin { supply: 14.0 })
        );
        assert_eq!(report.problem().num_origins(), 3);
        assert!(report.allocation().satisfies(report.problem()));
        assert_eq!(report.total_cost(), 80.0);
    }

    #[test]
    fn test_strict_options_reject_imbalance() {
        let problem = Problem::new(
            vec![vec![4.0, 1.0, 3.0], vec![2.0, 5.0, 6.0]],
            vec![30.0, 20.0],
            vec![25.0, 25.0, 10.0],
        )
        .unwrap();
        let result = solve(
            problem,
            Method::NorthwestCorner,
            SolveOptions::new().with_auto_balance(false),
        );

        assert!(matches!(
            result,
            Err(SolveError::Problem(ProblemError::Imbalanced { .. }))
        ));
    }

    #[test]
    fn test_single_cell_boundary() {
        let problem = Problem::new(vec![vec![3.0]], vec![7.0], vec![7.0]).unwrap();
        let report = solve(problem, Method::MinimumCost, SolveOptions::default()).unwrap();
        assert_eq!(report.total_cost(), 21.0);
        assert_eq!(report.steps().len(), 1);
    }

    #[test]
    fn test_report_display_summarizes_the_solve() {
        let report = solve(
            improvable_problem(),
            Method::Modi,
            SolveOptions::default(),
        )
        .unwrap();
        let rendered = format!("{}", report);
        assert!(rendered.contains("Method:     modi-refinement"));
        assert!(rendered.contains("Total cost: 100"));
    }
}

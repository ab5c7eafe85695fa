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

//! # Iterative Refinement
//!
//! Strategies that take a feasible allocation and pivot it toward the cost
//! optimum, one closed-loop shift per iteration. Two strategies are
//! provided; both identify the same entering cells on non-degenerate
//! tableaus and differ only in how they price candidates:
//!
//! - `stepping_stone`: prices every non-basic cell by walking its loop and
//!   summing costs with alternating signs.
//! - `modi`: solves the dual potentials once per iteration and prices each
//!   cell with a single reduced-cost subtraction.
//!
//! Every refiner run emits an `InitialCost` step first and an
//! `OptimalReached` step last, so an already-optimal input yields exactly
//! two steps with identical tableaus.

pub mod modi;
pub mod stepping_stone;

use crate::num::TransportNumeric;
use cartage_model::{allocation::Allocation, index::Cell, problem::Problem, trace::Step};

/// The owned result of one refiner run: the refined allocation and the
/// ordered steps that produced it.
pub struct Refinement<T> {
    allocation: Allocation<T>,
    steps: Vec<Step<T>>,
}

impl<T> std::fmt::Debug for Refinement<T>
where
    T: TransportNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refinement")
            .field("allocation", &self.allocation)
            .field("steps", &self.steps)
            .finish()
    }
}

impl<T> Refinement<T>
where
    T: TransportNumeric,
{
    /// Creates a new `Refinement`.
    #[inline]
    pub fn new(allocation: Allocation<T>, steps: Vec<Step<T>>) -> Self {
        Self { allocation, steps }
    }

    /// Returns the refined allocation.
    #[inline]
    pub fn allocation(&self) -> &Allocation<T> {
        &self.allocation
    }

    /// Returns the ordered step trace.
    #[inline]
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// Consumes the refinement, yielding its parts.
    #[inline]
    pub fn into_parts(self) -> (Allocation<T>, Vec<Step<T>>) {
        (self.allocation, self.steps)
    }
}

/// Errors a refiner can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineError {
    /// The tableau does not carry exactly `m + n - 1` basic cells, so
    /// loops and potentials are not well defined.
    Degenerate {
        /// Number of basic cells found.
        found: usize,
        /// The `m + n - 1` count a non-degenerate basis must have.
        expected: usize,
    },
    /// No closed alternating loop exists for the chosen entering cell.
    LoopNotFound {
        /// The entering cell the search started from.
        cell: Cell,
    },
}

impl std::fmt::Display for RefineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefineError::Degenerate { found, expected } => write!(
                f,
                "degenerate tableau: {} basic cells, expected {}",
                found, expected
            ),
            RefineError::LoopNotFound { cell } => {
                write!(f, "no closed loop found for entering cell {}", cell)
            }
        }
    }
}

impl std::error::Error for RefineError {}

/// A strategy that iteratively improves a feasible allocation.
pub trait Refiner<T>
where
    T: TransportNumeric,
{
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Refines `allocation` to optimality for `problem`.
    ///
    /// Expects a feasible, non-degenerate starting tableau, typically the
    /// output of an initial-solution builder.
    fn refine(
        &self,
        problem: &Problem<T>,
        allocation: Allocation<T>,
    ) -> Result<Refinement<T>, RefineError>;
}

/// Checks the `m + n - 1` basic-cell invariant before an iteration prices
/// candidates.
pub(crate) fn ensure_non_degenerate<T>(
    problem: &Problem<T>,
    allocation: &Allocation<T>,
) -> Result<(), RefineError>
where
    T: TransportNumeric,
{
    let expected = problem.num_origins() + problem.num_destinations() - 1;
    let found = allocation.num_basic();
    if found != expected {
        return Err(RefineError::Degenerate { found, expected });
    }
    Ok(())
}

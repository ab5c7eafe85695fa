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

//! Initial basic-feasible-solution builders
//!
//! Defines the builder seam and three deterministic strategies that turn a
//! balanced problem into a feasible starting tableau plus its step trace.
//! Each strategy consumes only the problem model; none depends on another.
//!
//! Provided builders:
//! - `northwest`: greedy cursor walk from the top-left cell.
//! - `vogel`: penalty-guided selection (difference of the two cheapest
//!   eligible costs per row/column, highest penalty first).
//! - `minimum_cost`: globally cheapest eligible cell first, rescanning a
//!   pre-sorted cost list after every allocation.
//!
//! All tie-breaks resolve to the first index in row-major order, so a
//! given instance always yields the same trace.

pub mod minimum_cost;
pub mod northwest;
pub mod vogel;

use crate::num::TransportNumeric;
use cartage_model::{allocation::Allocation, problem::Problem, trace::Step};

/// The owned result of one builder run: a feasible allocation and the
/// ordered steps that produced it.
pub struct InitialSolution<T> {
    allocation: Allocation<T>,
    steps: Vec<Step<T>>,
}

impl<T> InitialSolution<T>
where
    T: TransportNumeric,
{
    /// Creates a new `InitialSolution`.
    #[inline]
    pub fn new(allocation: Allocation<T>, steps: Vec<Step<T>>) -> Self {
        Self { allocation, steps }
    }

    /// Returns the finished allocation.
    #[inline]
    pub fn allocation(&self) -> &Allocation<T> {
        &self.allocation
    }

    /// Returns the ordered step trace.
    #[inline]
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// Consumes the solution, yielding its parts.
    #[inline]
    pub fn into_parts(self) -> (Allocation<T>, Vec<Step<T>>) {
        (self.allocation, self.steps)
    }
}

/// A strategy that constructs an initial feasible allocation for a
/// balanced problem.
pub trait InitialSolutionBuilder<T>
where
    T: TransportNumeric,
{
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Builds the initial allocation and its step trace.
    ///
    /// Expects a balanced problem; on a balanced instance the returned
    /// allocation satisfies all supply and demand exactly.
    fn build(&self, problem: &Problem<T>) -> InitialSolution<T>;
}

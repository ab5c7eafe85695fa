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

//! # Step Trace
//!
//! The audit trail of a solve: an ordered, append-only sequence of `Step`
//! snapshots, each pairing a deep copy of the allocation tableau with a
//! structured `StepEvent`. The engine never re-reads or revises an emitted
//! step; the replay consumer navigates the sequence by index.
//!
//! Events are typed rather than free-text so the renderer decides the
//! wording. `Display` provides the default rendering, with 1-based cell
//! numbering matching what end users see in a tableau.

use crate::{allocation::Allocation, index::Cell};
use cartage_core::num::constants::Tolerance;
use num_traits::Float;

/// What happened at one step of a build or refinement.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum StepEvent<T> {
    /// A refiner reported the objective value of its starting allocation.
    InitialCost {
        /// Objective value of the starting allocation.
        total_cost: T,
    },
    /// A builder placed `amount` units on `cell`.
    Allocated {
        /// The cell that received the allocation.
        cell: Cell,
        /// Quantity allocated.
        amount: T,
        /// Unit cost of the cell.
        unit_cost: T,
    },
    /// A refiner shifted `shifted` units around the closed loop entering
    /// at `entering`.
    LoopApplied {
        /// The previously non-basic cell the loop entered at.
        entering: Cell,
        /// The quantity shifted around the loop (theta).
        shifted: T,
        /// Objective value after the shift.
        total_cost: T,
    },
    /// A refiner proved the current allocation optimal.
    OptimalReached {
        /// Final objective value.
        total_cost: T,
    },
}

impl<T> std::fmt::Display for StepEvent<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitialCost { total_cost } => {
                write!(f, "Initial total cost: {}", total_cost)
            }
            Self::Allocated {
                cell,
                amount,
                unit_cost,
            } => write!(
                f,
                "Allocate {} units to cell ({}, {}) at unit cost {}",
                amount,
                cell.origin.get() + 1,
                cell.destination.get() + 1,
                unit_cost
            ),
            Self::LoopApplied {
                entering,
                shifted,
                total_cost,
            } => write!(
                f,
                "Shift {} units around the loop entering at cell ({}, {}); total cost: {}",
                shifted,
                entering.origin.get() + 1,
                entering.destination.get() + 1,
                total_cost
            ),
            Self::OptimalReached { total_cost } => {
                write!(f, "The current allocation is optimal; total cost: {}", total_cost)
            }
        }
    }
}

/// One immutable snapshot of the solve: the allocation as it stood after
/// the event, plus the event itself.
#[derive(Clone, PartialEq)]
pub struct Step<T> {
    allocation: Allocation<T>,
    event: StepEvent<T>,
}

impl<T> std::fmt::Debug for Step<T>
where
    T: Float + Tolerance + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("allocation", &self.allocation)
            .field("event", &self.event)
            .finish()
    }
}

impl<T> Step<T>
where
    T: Float + Tolerance,
{
    /// Creates a new `Step` owning the given snapshot.
    ///
    /// Callers pass a clone of the live tableau; a step never aliases
    /// state that a later step will mutate.
    #[inline]
    pub fn new(allocation: Allocation<T>, event: StepEvent<T>) -> Self {
        Self { allocation, event }
    }

    /// Returns the allocation snapshot of this step.
    #[inline]
    pub fn allocation(&self) -> &Allocation<T> {
        &self.allocation
    }

    /// Returns the event of this step.
    #[inline]
    pub fn event(&self) -> &StepEvent<T> {
        &self.event
    }
}

impl<T> std::fmt::Display for Step<T>
where
    T: Float + Tolerance + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_rendering_is_one_based() {
        let event = StepEvent::Allocated {
            cell: Cell::at(0, 0),
            amount: 20.0,
            unit_cost: 4.0,
        };
        assert_eq!(
            format!("{}", event),
            "Allocate 20 units to cell (1, 1) at unit cost 4"
        );
    }

    #[test]
    fn test_optimal_rendering() {
        let event = StepEvent::<f64>::OptimalReached { total_cost: 490.0 };
        assert_eq!(
            format!("{}", event),
            "The current allocation is optimal; total cost: 490"
        );
    }

    #[test]
    fn test_step_snapshot_is_independent() {
        let mut live = Allocation::<f64>::zeroed(2, 2);
        live.set(Cell::at(0, 0), 5.0);

        let step = Step::new(
            live.clone(),
            StepEvent::Allocated {
                cell: Cell::at(0, 0),
                amount: 5.0,
                unit_cost: 1.0,
            },
        );

        // Mutating the live tableau must not change the snapshot.
        live.set(Cell::at(0, 0), 9.0);
        assert_eq!(step.allocation().get(Cell::at(0, 0)), 5.0);
    }
}

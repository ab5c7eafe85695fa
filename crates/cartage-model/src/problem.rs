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

//! # Transportation Problem Instance
//!
//! The immutable data model describing origins, destinations, unit shipping
//! costs, supply capacities, and demand requirements.
//!
//! All validation happens at construction: `Problem::new` rejects empty
//! dimensions, shape mismatches between the cost matrix and the two
//! vectors, and negative entries. A constructed `Problem` is therefore
//! safe to index without re-checking, and solvers treat it as read-only.
//!
//! Balancing is the one sanctioned mutation, and it produces a new value:
//! `Problem::balanced` either passes a balanced instance through, appends a
//! zero-cost dummy origin or destination to absorb the deficit, or rejects
//! the instance when the caller opted out of auto-balancing.
//!
//! ## Usage
//!
//! ```rust
//! use cartage_model::problem::{BalancePolicy, Problem};
//!
//! let problem = Problem::new(
//!     vec![vec![4.0, 6.0], vec![5.0, 4.0]],
//!     vec![20.0, 30.0],
//!     vec![25.0, 25.0],
//! ).unwrap();
//! assert!(problem.is_balanced());
//!
//! let (balanced, adjustment) = problem.balanced(BalancePolicy::AutoBalance).unwrap();
//! assert!(adjustment.is_none());
//! assert_eq!(balanced.num_origins(), 2);
//! ```

use crate::index::{Cell, DestinationIndex, OriginIndex};
use cartage_core::{
    math::matrix::Matrix,
    num::{approx::approx_eq, constants::Tolerance},
};
use num_traits::Float;

/// How an imbalanced instance (total supply != total demand) is handled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BalancePolicy {
    /// Append a zero-cost dummy origin or destination to absorb the deficit.
    #[default]
    AutoBalance,
    /// Reject imbalanced instances with `ProblemError::Imbalanced`.
    Strict,
}

/// The augmentation applied by `Problem::balanced` to restore balance.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BalanceAdjustment<T> {
    /// A zero-cost supply row was appended with the given capacity.
    DummyOrigin {
        /// Supply assigned to the dummy origin (the demand surplus).
        supply: T,
    },
    /// A zero-cost demand column was appended with the given requirement.
    DummyDestination {
        /// Demand assigned to the dummy destination (the supply surplus).
        demand: T,
    },
}

/// The error type for problem construction and balancing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// The instance has zero origins or zero destinations.
    EmptyDimensions {
        /// Number of origins found.
        num_origins: usize,
        /// Number of destinations found.
        num_destinations: usize,
    },
    /// A cost row has a different length than the demand vector.
    RaggedCostRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Expected number of columns.
        expected: usize,
        /// Number of columns found.
        found: usize,
    },
    /// The cost matrix shape disagrees with the supply/demand lengths.
    ShapeMismatch {
        /// Number of cost rows found.
        cost_rows: usize,
        /// Length of the supply vector.
        supply_len: usize,
        /// Length of the demand vector.
        demand_len: usize,
    },
    /// A cost entry is negative (or not a number).
    NegativeCost {
        /// Zero-based (row, column) of the offending entry.
        cell: (usize, usize),
    },
    /// A supply entry is negative (or not a number).
    NegativeSupply {
        /// Zero-based index of the offending origin.
        origin: usize,
    },
    /// A demand entry is negative (or not a number).
    NegativeDemand {
        /// Zero-based index of the offending destination.
        destination: usize,
    },
    /// Totals differ and the balance policy is `Strict`.
    Imbalanced {
        /// Total supply of the instance.
        total_supply: f64,
        /// Total demand of the instance.
        total_demand: f64,
    },
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDimensions {
                num_origins,
                num_destinations,
            } => write!(
                f,
                "Problem dimensions must be positive: {} origins, {} destinations",
                num_origins, num_destinations
            ),
            Self::RaggedCostRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Cost row {} has {} columns, expected {}",
                row, found, expected
            ),
            Self::ShapeMismatch {
                cost_rows,
                supply_len,
                demand_len,
            } => write!(
                f,
                "Cost matrix has {} rows but supply has {} entries and demand has {} entries",
                cost_rows, supply_len, demand_len
            ),
            Self::NegativeCost { cell } => {
                write!(f, "Cost at cell ({}, {}) must be non-negative", cell.0, cell.1)
            }
            Self::NegativeSupply { origin } => {
                write!(f, "Supply at origin {} must be non-negative", origin)
            }
            Self::NegativeDemand { destination } => write!(
                f,
                "Demand at destination {} must be non-negative",
                destination
            ),
            Self::Imbalanced {
                total_supply,
                total_demand,
            } => write!(
                f,
                "Problem is imbalanced: total supply {} != total demand {}",
                total_supply, total_demand
            ),
        }
    }
}

impl std::error::Error for ProblemError {}

/// A validated transportation problem instance.
///
/// Holds the m×n unit cost matrix, the length-m supply vector, and the
/// length-n demand vector. Immutable for the duration of a solve; solvers
/// copy whatever they need to mutate.
#[derive(Clone, PartialEq)]
pub struct Problem<T> {
    costs: Matrix<T>,
    supply: Vec<T>,
    demand: Vec<T>,
}

impl<T> Problem<T>
where
    T: Float + Tolerance,
{
    /// Constructs a validated `Problem` from nested cost rows and the two
    /// marginal vectors.
    ///
    /// # Errors
    ///
    /// - `EmptyDimensions` if either vector is empty.
    /// - `ShapeMismatch` if the cost matrix does not have
    ///   `supply.len()` rows.
    /// - `RaggedCostRow` if any cost row differs from `demand.len()`.
    /// - `NegativeCost` / `NegativeSupply` / `NegativeDemand` for entries
    ///   that are negative or NaN.
    pub fn new(
        cost_rows: Vec<Vec<T>>,
        supply: Vec<T>,
        demand: Vec<T>,
    ) -> Result<Self, ProblemError> {
        let num_origins = supply.len();
        let num_destinations = demand.len();

        if num_origins == 0 || num_destinations == 0 {
            return Err(ProblemError::EmptyDimensions {
                num_origins,
                num_destinations,
            });
        }

        if cost_rows.len() != num_origins {
            return Err(ProblemError::ShapeMismatch {
                cost_rows: cost_rows.len(),
                supply_len: num_origins,
                demand_len: num_destinations,
            });
        }

        for (row, costs) in cost_rows.iter().enumerate() {
            if costs.len() != num_destinations {
                return Err(ProblemError::RaggedCostRow {
                    row,
                    expected: num_destinations,
                    found: costs.len(),
                });
            }
            for (col, &cost) in costs.iter().enumerate() {
                // `!(x >= 0)` also catches NaN.
                if !(cost >= T::zero()) {
                    return Err(ProblemError::NegativeCost { cell: (row, col) });
                }
            }
        }

        for (origin, &s) in supply.iter().enumerate() {
            if !(s >= T::zero()) {
                return Err(ProblemError::NegativeSupply { origin });
            }
        }
        for (destination, &d) in demand.iter().enumerate() {
            if !(d >= T::zero()) {
                return Err(ProblemError::NegativeDemand { destination });
            }
        }

        let costs = Matrix::from_rows(cost_rows).ok_or(ProblemError::EmptyDimensions {
            num_origins,
            num_destinations,
        })?;

        Ok(Self {
            costs,
            supply,
            demand,
        })
    }

    /// Returns the number of origins (supply rows).
    #[inline]
    pub fn num_origins(&self) -> usize {
        self.supply.len()
    }

    /// Returns the number of destinations (demand columns).
    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.demand.len()
    }

    /// Returns the unit cost of shipping along `cell`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate of `cell` is out of bounds.
    #[inline]
    pub fn cost(&self, cell: Cell) -> T {
        self.costs.get(cell.origin.get(), cell.destination.get())
    }

    /// Returns the unit cost matrix.
    #[inline]
    pub fn costs(&self) -> &Matrix<T> {
        &self.costs
    }

    /// Returns the supply vector.
    #[inline]
    pub fn supply(&self) -> &[T] {
        &self.supply
    }

    /// Returns the demand vector.
    #[inline]
    pub fn demand(&self) -> &[T] {
        &self.demand
    }

    /// Returns the supply capacity of one origin.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is out of bounds.
    #[inline]
    pub fn supply_at(&self, origin: OriginIndex) -> T {
        let index = origin.get();
        debug_assert!(
            index < self.num_origins(),
            "called `Problem::supply_at` with origin index out of bounds: the len is {} but the index is {}",
            self.num_origins(),
            index
        );

        self.supply[index]
    }

    /// Returns the demand requirement of one destination.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is out of bounds.
    #[inline]
    pub fn demand_at(&self, destination: DestinationIndex) -> T {
        let index = destination.get();
        debug_assert!(
            index < self.num_destinations(),
            "called `Problem::demand_at` with destination index out of bounds: the len is {} but the index is {}",
            self.num_destinations(),
            index
        );

        self.demand[index]
    }

    /// Returns the total supply across all origins.
    #[inline]
    pub fn total_supply(&self) -> T {
        self.supply.iter().fold(T::zero(), |acc, &s| acc + s)
    }

    /// Returns the total demand across all destinations.
    #[inline]
    pub fn total_demand(&self) -> T {
        self.demand.iter().fold(T::zero(), |acc, &d| acc + d)
    }

    /// Returns `true` if total supply equals total demand within tolerance.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        approx_eq(self.total_supply(), self.total_demand())
    }

    /// Balances the instance under the given policy.
    ///
    /// A balanced instance passes through unchanged. Under `AutoBalance`, a
    /// supply deficit appends a zero-cost dummy origin and a demand deficit
    /// appends a zero-cost dummy destination; the applied augmentation is
    /// reported alongside the new instance. Under `Strict`, an imbalanced
    /// instance is rejected.
    ///
    /// # Errors
    ///
    /// `ProblemError::Imbalanced` when totals differ and the policy is
    /// `Strict`.
    pub fn balanced(
        self,
        policy: BalancePolicy,
    ) -> Result<(Self, Option<BalanceAdjustment<T>>), ProblemError> {
        if self.is_balanced() {
            return Ok((self, None));
        }

        let total_supply = self.total_supply();
        let total_demand = self.total_demand();

        if policy == BalancePolicy::Strict {
            return Err(ProblemError::Imbalanced {
                total_supply: total_supply.to_f64().unwrap_or(f64::NAN),
                total_demand: total_demand.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut costs = self.costs;
        let mut supply = self.supply;
        let mut demand = self.demand;

        let adjustment = if total_supply < total_demand {
            let deficit = total_demand - total_supply;
            costs.push_row(T::zero());
            supply.push(deficit);
            BalanceAdjustment::DummyOrigin { supply: deficit }
        } else {
            let surplus = total_supply - total_demand;
            costs.push_col(T::zero());
            demand.push(surplus);
            BalanceAdjustment::DummyDestination { demand: surplus }
        };

        Ok((
            Self {
                costs,
                supply,
                demand,
            },
            Some(adjustment),
        ))
    }
}

impl<T> std::fmt::Debug for Problem<T>
where
    T: Float + Tolerance + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("costs", &self.costs)
            .field("supply", &self.supply)
            .field("demand", &self.demand)
            .finish()
    }
}

impl<T> std::fmt::Display for Problem<T>
where
    T: Float + Tolerance,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Problem(num_origins: {}, num_destinations: {})",
            self.num_origins(),
            self.num_destinations()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_3x3() -> Problem<f64> {
        Problem::new(
            vec![
                vec![4.0, 6.0, 8.0],
                vec![5.0, 4.0, 7.0],
                vec![6.0, 3.0, 4.0],
            ],
            vec![20.0, 30.0, 50.0],
            vec![30.0, 40.0, 30.0],
        )
        .expect("valid problem")
    }

    #[test]
    fn test_construction_and_accessors() {
        let p = balanced_3x3();
        assert_eq!(p.num_origins(), 3);
        assert_eq!(p.num_destinations(), 3);
        assert_eq!(p.cost(Cell::at(1, 2)), 7.0);
        assert_eq!(p.supply_at(OriginIndex::new(2)), 50.0);
        assert_eq!(p.demand_at(DestinationIndex::new(1)), 40.0);
        assert_eq!(p.total_supply(), 100.0);
        assert_eq!(p.total_demand(), 100.0);
        assert!(p.is_balanced());
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let res = Problem::<f64>::new(vec![], vec![], vec![1.0]);
        assert!(matches!(res, Err(ProblemError::EmptyDimensions { .. })));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let res = Problem::new(vec![vec![1.0, 2.0]], vec![5.0, 5.0], vec![5.0, 5.0]);
        assert!(matches!(
            res,
            Err(ProblemError::ShapeMismatch {
                cost_rows: 1,
                supply_len: 2,
                demand_len: 2
            })
        ));
    }

    #[test]
    fn test_rejects_ragged_cost_row() {
        let res = Problem::new(
            vec![vec![1.0, 2.0], vec![3.0]],
            vec![5.0, 5.0],
            vec![5.0, 5.0],
        );
        assert!(matches!(
            res,
            Err(ProblemError::RaggedCostRow {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_rejects_negative_entries() {
        let res = Problem::new(vec![vec![1.0, -2.0]], vec![5.0], vec![3.0, 2.0]);
        assert!(matches!(
            res,
            Err(ProblemError::NegativeCost { cell: (0, 1) })
        ));

        let res = Problem::new(vec![vec![1.0, 2.0]], vec![-5.0], vec![3.0, 2.0]);
        assert!(matches!(res, Err(ProblemError::NegativeSupply { origin: 0 })));

        let res = Problem::new(vec![vec![1.0, 2.0]], vec![5.0], vec![3.0, -2.0]);
        assert!(matches!(
            res,
            Err(ProblemError::NegativeDemand { destination: 1 })
        ));
    }

    #[test]
    fn test_rejects_nan_cost() {
        let res = Problem::new(vec![vec![1.0, f64::NAN]], vec![5.0], vec![3.0, 2.0]);
        assert!(matches!(res, Err(ProblemError::NegativeCost { .. })));
    }

    #[test]
    fn test_balanced_passthrough() {
        let p = balanced_3x3();
        let (q, adjustment) = p.clone().balanced(BalancePolicy::Strict).unwrap();
        assert!(adjustment.is_none());
        assert_eq!(q, p);
    }

    #[test]
    fn test_strict_rejects_imbalance() {
        let p = Problem::new(vec![vec![1.0, 2.0]], vec![5.0], vec![3.0, 4.0]).unwrap();
        let res = p.balanced(BalancePolicy::Strict);
        assert!(matches!(res, Err(ProblemError::Imbalanced { .. })));
    }

    #[test]
    fn test_auto_balance_appends_dummy_origin() {
        // Supply deficit of 2: expect a zero-cost dummy row with supply 2.
        let p = Problem::new(vec![vec![1.0, 2.0]], vec![5.0], vec![3.0, 4.0]).unwrap();
        let (q, adjustment) = p.balanced(BalancePolicy::AutoBalance).unwrap();
        assert_eq!(
            adjustment,
            Some(BalanceAdjustment::DummyOrigin { supply: 2.0 })
        );
        assert_eq!(q.num_origins(), 2);
        assert_eq!(q.supply_at(OriginIndex::new(1)), 2.0);
        assert_eq!(q.cost(Cell::at(1, 0)), 0.0);
        assert_eq!(q.cost(Cell::at(1, 1)), 0.0);
        assert!(q.is_balanced());
    }

    #[test]
    fn test_auto_balance_appends_dummy_destination() {
        // Demand deficit of 3: expect a zero-cost dummy column with demand 3.
        let p = Problem::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![5.0, 5.0],
            vec![4.0, 3.0],
        )
        .unwrap();
        let (q, adjustment) = p.balanced(BalancePolicy::AutoBalance).unwrap();
        assert_eq!(
            adjustment,
            Some(BalanceAdjustment::DummyDestination { demand: 3.0 })
        );
        assert_eq!(q.num_destinations(), 3);
        assert_eq!(q.demand_at(DestinationIndex::new(2)), 3.0);
        assert_eq!(q.cost(Cell::at(0, 2)), 0.0);
        assert_eq!(q.cost(Cell::at(1, 2)), 0.0);
        assert!(q.is_balanced());
    }
}

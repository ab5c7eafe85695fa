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

//! # Cartage Solver
//!
//! The optimization engine for the classical transportation problem: three
//! initial basic-feasible-solution builders (Northwest-Corner, Vogel's
//! Approximation, Minimum-Cost) and two optimality refiners
//! (Stepping-Stone, MODI) that detect and exploit closed reallocation
//! loops through the basic cells of the tableau.
//!
//! ## Modules
//!
//! - `num`: The `TransportNumeric` trait alias bundling the float bounds
//!   every solver component requires.
//! - `state`: Shared builder bookkeeping (remaining supply/demand copies,
//!   step emission).
//! - `initial`: The `InitialSolutionBuilder` seam and its three
//!   deterministic strategies.
//! - `loops`: Closed-loop search over the bipartite basic-cell graph and
//!   loop application (theta shift).
//! - `refine`: The `Refiner` seam with the Stepping-Stone and MODI
//!   strategies, dual potentials, and degeneracy detection.
//! - `solver`: High-level `solve` entry point with method selection,
//!   balancing policy, and a replayable `SolveReport`.
//!
//! ## Motivation
//!
//! Every method here is deterministic by construction: ties break on the
//! first index in row-major order, so a given instance always produces the
//! same step trace. The trace, not just the final tableau, is the product;
//! the surrounding application replays it step by step.

pub mod initial;
pub mod loops;
pub mod num;
pub mod refine;
pub mod solver;
pub mod state;

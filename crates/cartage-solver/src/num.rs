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

//! # Transport Numeric Trait
//!
//! Unified numeric bounds for the solver components. Quantities and costs
//! in the transportation problem are non-negative reals, so the solver is
//! generic over float types rather than integers, and every approximate
//! comparison routes through the `Tolerance` constant.
//!
//! `Send + Sync` is required so independent solves can run on parallel
//! threads; within one solve everything is single-threaded and owned.

use cartage_core::num::constants::Tolerance;
use num_traits::{Float, FromPrimitive};

/// A trait alias for numeric types usable by the solver. In practice these
/// are `f32` and `f64`.
pub trait TransportNumeric:
    Float
    + FromPrimitive
    + Tolerance
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
{
}

impl<T> TransportNumeric for T where
    T: Float
        + FromPrimitive
        + Tolerance
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
{
}

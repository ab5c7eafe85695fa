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

//! # Cartage Core
//!
//! Foundational utilities, numerics, and math primitives for the Cartage
//! transportation-solver ecosystem. This crate consolidates the reusable
//! building blocks that underpin the model and solver crates.
//!
//! ## Modules
//!
//! - `math`: Dense row-major matrix storage with checked accessors, the
//!   shape shared by cost and allocation tables.
//! - `num`: Float-centric utilities including the `Tolerance` associated
//!   constant trait and approximate comparison helpers.
//! - `utils`: Core helpers such as phantom-tagged, strongly typed indices
//!   (`TypedIndex<T>`).
//!
//! ## Purpose
//!
//! These primitives enable robust, generic code in the optimization
//! pipeline, reducing accidental bugs (e.g., index mixing, brittle float
//! equality) while keeping runtime overhead minimal.
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod num;
pub mod utils;

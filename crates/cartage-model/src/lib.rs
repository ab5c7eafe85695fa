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

//! # Cartage Model
//!
//! The data model of the classical transportation problem: a validated,
//! immutable problem instance (cost matrix, supply vector, demand vector),
//! the allocation tableau the solvers mutate, and the append-only step
//! trace they emit for replay.
//!
//! ## Modules
//!
//! - `index`: Typed `OriginIndex` / `DestinationIndex` and the `Cell` pair.
//! - `problem`: Validated `Problem<T>` with balance checking and dummy-row/
//!   dummy-column augmentation under a configurable policy.
//! - `allocation`: The m×n shipment tableau with basic-cell queries,
//!   marginal totals, and the total-cost evaluator.
//! - `trace`: Structured `Step` / `StepEvent` snapshots; `Display` is the
//!   rendering layer for human-readable descriptions.
//! - `loading`: Whitespace-delimited instance parser for files, readers,
//!   and string slices.

pub mod allocation;
pub mod index;
pub mod loading;
pub mod problem;
pub mod trace;

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

//! Associated-constant traits for float types.
//!
//! Supply and demand quantities are real-valued, so every "is this zero",
//! "are these equal" decision in the engine goes through a fixed absolute
//! tolerance instead of bitwise float equality. The `Tolerance` trait pins
//! that epsilon per scalar type as an associated constant.

/// A trait for float types that carry an absolute comparison tolerance.
///
/// # Examples
///
/// ```rust
/// # use cartage_core::num::constants::Tolerance;
///
/// assert!(f64::TOLERANCE > 0.0);
/// assert!(f32::TOLERANCE > 0.0);
/// ```
pub trait Tolerance {
    /// The absolute tolerance used for approximate comparisons.
    const TOLERANCE: Self;
}

macro_rules! impl_tolerance_for {
    ($t:ty, $value:expr) => {
        impl Tolerance for $t {
            const TOLERANCE: Self = $value;
        }
    };
}

impl_tolerance_for!(f32, 1e-4);
impl_tolerance_for!(f64, 1e-9);

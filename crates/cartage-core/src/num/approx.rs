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

//! Approximate float comparisons against the `Tolerance` epsilon.

use crate::num::constants::Tolerance;
use num_traits::Float;

/// Returns `true` if `value` lies within the tolerance band around zero.
///
/// # Examples
///
/// ```rust
/// # use cartage_core::num::approx::approx_zero;
///
/// assert!(approx_zero(0.0_f64));
/// assert!(approx_zero(1e-12_f64));
/// assert!(!approx_zero(0.5_f64));
/// ```
#[inline(always)]
pub fn approx_zero<T>(value: T) -> bool
where
    T: Float + Tolerance,
{
    value.abs() <= T::TOLERANCE
}

/// Returns `true` if `lhs` and `rhs` differ by no more than the tolerance.
#[inline(always)]
pub fn approx_eq<T>(lhs: T, rhs: T) -> bool
where
    T: Float + Tolerance,
{
    approx_zero(lhs - rhs)
}

/// Returns `true` if `value` is strictly positive beyond the tolerance.
#[inline(always)]
pub fn definitely_positive<T>(value: T) -> bool
where
    T: Float + Tolerance,
{
    value > T::TOLERANCE
}

/// Returns `true` if `value` is strictly negative beyond the tolerance.
#[inline(always)]
pub fn definitely_negative<T>(value: T) -> bool
where
    T: Float + Tolerance,
{
    value < -T::TOLERANCE
}

/// Snaps values inside the tolerance band to exactly zero.
///
/// Loop applications subtract equal quantities from several cells; residues
/// on the order of float rounding must not keep a cell spuriously basic.
#[inline(always)]
pub fn snap_zero<T>(value: T) -> T
where
    T: Float + Tolerance,
{
    if approx_zero(value) { T::zero() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_zero() {
        assert!(approx_zero(0.0_f64));
        assert!(approx_zero(-1e-12_f64));
        assert!(!approx_zero(1e-3_f64));
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0_f64, 1.0 + 1e-12));
        assert!(!approx_eq(1.0_f64, 1.1));
    }

    #[test]
    fn test_signed_predicates() {
        assert!(definitely_positive(0.5_f64));
        assert!(!definitely_positive(1e-12_f64));
        assert!(definitely_negative(-0.5_f64));
        assert!(!definitely_negative(-1e-12_f64));
    }

    #[test]
    fn test_snap_zero() {
        assert_eq!(snap_zero(1e-12_f64), 0.0);
        assert_eq!(snap_zero(2.5_f64), 2.5);
        assert_eq!(snap_zero(-1e-12_f64), 0.0);
    }
}

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

//! # Solver Numeric Trait
//!
//! `SolverNumeric` collects the integer capabilities required by the model and
//! the branch-and-bound engine: `PrimInt + Signed` fundamentals, lossless-ish
//! conversion from `f64` (`FromPrimitive`) for reading integral relaxation
//! values back, the `MinusOne` sentinel, and by-value checked/saturating
//! arithmetic.
//!
//! Values, volumes, the capacity and quantities all share one type, so a
//! model instantiated with `i32` searches entirely in `i32`.

use crate::num::{
    constants::MinusOne,
    ops::{checked_arithmetic, saturating_arithmetic},
};
use num_traits::{FromPrimitive, PrimInt, Signed};
use std::{cmp::Ordering, hash::Hash};

/// A trait alias for signed integer types that can be used as values,
/// volumes and quantities of a knapsack model.
///
/// In practice these are `i8`, `i16`, `i32`, `i64`, `i128` and `isize`.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + MinusOne
    + saturating_arithmetic::SaturatingAddVal
    + saturating_arithmetic::SaturatingSubVal
    + saturating_arithmetic::SaturatingMulVal
    + checked_arithmetic::CheckedAddVal
    + checked_arithmetic::CheckedSubVal
    + checked_arithmetic::CheckedMulVal
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + MinusOne
        + saturating_arithmetic::SaturatingAddVal
        + saturating_arithmetic::SaturatingSubVal
        + saturating_arithmetic::SaturatingMulVal
        + checked_arithmetic::CheckedAddVal
        + checked_arithmetic::CheckedSubVal
        + checked_arithmetic::CheckedMulVal
        + Send
        + Sync
        + Hash
{
}

/// Converts a solver integer to `f64`.
///
/// Every primitive integer has an `f64` image (possibly rounded for magnitudes
/// above 2^53), so the `NaN` fallback is never taken for the implementors of
/// `SolverNumeric`.
#[inline(always)]
pub fn to_f64<T>(x: T) -> f64
where
    T: SolverNumeric,
{
    x.to_f64().unwrap_or(f64::NAN)
}

/// Compares `lhs_num / lhs_den` with `rhs_num / rhs_den` for positive
/// denominators.
///
/// Cross-multiplies in `i128`, which is exact for every type up to 64 bits,
/// and only compares the rounded `f64` quotients when a product overflows.
pub fn cmp_ratios<T>(lhs_num: T, lhs_den: T, rhs_num: T, rhs_den: T) -> Ordering
where
    T: SolverNumeric,
{
    debug_assert!(
        lhs_den > T::zero() && rhs_den > T::zero(),
        "called `cmp_ratios` with a non-positive denominator: {} and {}",
        lhs_den,
        rhs_den
    );

    match (cross_product(lhs_num, rhs_den), cross_product(rhs_num, lhs_den)) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        _ => (to_f64(lhs_num) / to_f64(lhs_den)).total_cmp(&(to_f64(rhs_num) / to_f64(rhs_den))),
    }
}

#[inline(always)]
fn cross_product<T>(a: T, b: T) -> Option<i128>
where
    T: SolverNumeric,
{
    a.to_i128()?.checked_mul(b.to_i128()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solver_numeric<T: SolverNumeric>() {}

    #[test]
    fn test_signed_primitives_are_solver_numeric() {
        assert_solver_numeric::<i8>();
        assert_solver_numeric::<i16>();
        assert_solver_numeric::<i32>();
        assert_solver_numeric::<i64>();
        assert_solver_numeric::<i128>();
        assert_solver_numeric::<isize>();
    }

    #[test]
    fn test_from_f64_round_trips_integral_values() {
        fn read_back<T: SolverNumeric>(x: f64) -> Option<T> {
            T::from_f64(x)
        }
        assert_eq!(read_back::<i64>(51.0), Some(51));
        assert_eq!(read_back::<i32>(-3.0), Some(-3));
        assert_eq!(read_back::<i8>(1000.0), None);
    }

    #[test]
    fn test_cmp_ratios() {
        assert_eq!(cmp_ratios(12i64, 3, 15, 5), Ordering::Greater);
        assert_eq!(cmp_ratios(6i64, 2, 9, 3), Ordering::Equal);
        assert_eq!(cmp_ratios(2i32, 2, 8, 4), Ordering::Less);
    }

    #[test]
    fn test_cmp_ratios_beyond_f64_precision() {
        // (2^54 + 1) / 2 < 2^53 + 1, but both quotients round to 2^53 as f64.
        let two_53 = 1i64 << 53;
        assert_eq!(
            to_f64(2 * two_53 + 1) / 2.0,
            to_f64(two_53 + 1) / 1.0
        );
        assert_eq!(cmp_ratios(2 * two_53 + 1, 2, two_53 + 1, 1), Ordering::Less);
    }

    #[test]
    fn test_to_f64_is_exact_for_small_magnitudes() {
        assert_eq!(to_f64(14i64), 14.0);
        assert_eq!(to_f64(-7i32), -7.0);
    }
}

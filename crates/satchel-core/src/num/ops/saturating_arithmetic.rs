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

macro_rules! saturating_impl_binary_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),*) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: Self) -> Self {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

/// Saturating addition by value.
///
/// # Examples
///
/// ```rust
/// # use satchel_core::num::ops::saturating_arithmetic::SaturatingAddVal;
///
/// assert_eq!(120i8.saturating_add_val(10), 127);
/// assert_eq!((-120i8).saturating_add_val(-20), -128);
/// ```
pub trait SaturatingAddVal: Sized {
    /// Adds `v`, clamping at the numeric bounds.
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating subtraction by value.
///
/// # Examples
///
/// ```rust
/// # use satchel_core::num::ops::saturating_arithmetic::SaturatingSubVal;
///
/// assert_eq!((-120i8).saturating_sub_val(20), -128);
/// ```
pub trait SaturatingSubVal: Sized {
    /// Subtracts `v`, clamping at the numeric bounds.
    fn saturating_sub_val(self, v: Self) -> Self;
}

/// Saturating multiplication by value.
///
/// # Examples
///
/// ```rust
/// # use satchel_core::num::ops::saturating_arithmetic::SaturatingMulVal;
///
/// assert_eq!(100i8.saturating_mul_val(2), 127);
/// assert_eq!(100i8.saturating_mul_val(-2), -128);
/// ```
pub trait SaturatingMulVal: Sized {
    /// Multiplies by `v`, clamping at the numeric bounds.
    fn saturating_mul_val(self, v: Self) -> Self;
}

saturating_impl_binary_val!(SaturatingAddVal, saturating_add_val, saturating_add, i8, i16, i32, i64, i128, isize, u64, usize);
saturating_impl_binary_val!(SaturatingSubVal, saturating_sub_val, saturating_sub, i8, i16, i32, i64, i128, isize, u64, usize);
saturating_impl_binary_val!(SaturatingMulVal, saturating_mul_val, saturating_mul, i8, i16, i32, i64, i128, isize, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_ops_in_range() {
        assert_eq!(40i32.saturating_add_val(2), 42);
        assert_eq!(40i32.saturating_sub_val(2), 38);
        assert_eq!(40i32.saturating_mul_val(2), 80);
        assert_eq!(3u64.saturating_add_val(4), 7);
    }

    #[test]
    fn test_saturating_ops_clamp() {
        assert_eq!(i64::MAX.saturating_add_val(1), i64::MAX);
        assert_eq!(i64::MIN.saturating_sub_val(1), i64::MIN);
        assert_eq!(i64::MAX.saturating_mul_val(3), i64::MAX);
        assert_eq!(u64::MAX.saturating_add_val(1), u64::MAX);
        assert_eq!(0usize.saturating_sub_val(1), 0);
    }
}

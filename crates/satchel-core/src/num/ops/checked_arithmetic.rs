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

macro_rules! checked_impl_binary_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),*) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: Self) -> Option<Self> {
                    <$t>::$src_method(self, v)
                }
            }
        )*
    };
}

/// Checked addition by value.
///
/// # Examples
///
/// ```rust
/// # use satchel_core::num::ops::checked_arithmetic::CheckedAddVal;
///
/// assert_eq!(120i8.checked_add_val(7), Some(127));
/// assert_eq!(120i8.checked_add_val(8), None);
/// ```
pub trait CheckedAddVal: Sized {
    /// Adds `v`, returning `None` on overflow.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// Checked subtraction by value.
///
/// # Examples
///
/// ```rust
/// # use satchel_core::num::ops::checked_arithmetic::CheckedSubVal;
///
/// assert_eq!((-120i8).checked_sub_val(8), Some(-128));
/// assert_eq!((-120i8).checked_sub_val(9), None);
/// ```
pub trait CheckedSubVal: Sized {
    /// Subtracts `v`, returning `None` on overflow.
    fn checked_sub_val(self, v: Self) -> Option<Self>;
}

/// Checked multiplication by value.
///
/// # Examples
///
/// ```rust
/// # use satchel_core::num::ops::checked_arithmetic::CheckedMulVal;
///
/// assert_eq!(12i16.checked_mul_val(1000), Some(12000));
/// assert_eq!(12i16.checked_mul_val(10000), None);
/// ```
pub trait CheckedMulVal: Sized {
    /// Multiplies by `v`, returning `None` on overflow.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

checked_impl_binary_val!(CheckedAddVal, checked_add_val, checked_add, i8, i16, i32, i64, i128, isize);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, checked_sub, i8, i16, i32, i64, i128, isize);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, checked_mul, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_ops_in_range() {
        assert_eq!(5i64.checked_add_val(7), Some(12));
        assert_eq!(5i64.checked_sub_val(7), Some(-2));
        assert_eq!(5i64.checked_mul_val(7), Some(35));
    }

    #[test]
    fn test_checked_ops_overflow() {
        assert_eq!(i32::MAX.checked_add_val(1), None);
        assert_eq!(i32::MIN.checked_sub_val(1), None);
        assert_eq!(i32::MAX.checked_mul_val(2), None);
    }
}

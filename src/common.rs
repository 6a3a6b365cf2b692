// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("polyroots requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn cbrt(self) -> Self => cbrt;
    fn exp(self) -> Self => exp;
    fn floor(self) -> Self => floor;
    fn hypot(self, other: Self) -> Self => hypot;
    fn ln(self) -> Self => log;
    fn powi(self, n: i32) -> Self => pow;
    fn round(self) -> Self => round;
    fn sin_cos(self) -> (Self, Self) => sincos;
    fn sqrt(self) -> Self => sqrt;
}

/// Adds the sign and integrality tests used by the solvers to `f64`.
pub trait FloatExt {
    /// Returns `-1.0` for negative values and `1.0` otherwise.
    ///
    /// Unlike [`f64::signum`], zero of either sign maps to `1.0`, so
    /// `x + x.sign() * y` never cancels when `x` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyroots::common::FloatExt;
    ///
    /// assert_eq!(0.0_f64.sign(), 1.0);
    /// assert_eq!((-0.0_f64).sign(), 1.0);
    /// assert_eq!((-2.5_f64).sign(), -1.0);
    /// ```
    fn sign(self) -> f64;

    /// True if the value is finite and has no fractional part.
    fn is_integral(self) -> bool;
}

impl FloatExt for f64 {
    #[inline]
    fn sign(self) -> f64 {
        if self < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    #[inline]
    fn is_integral(self) -> bool {
        self.is_finite() && self.floor() == self
    }
}

#[cfg(test)]
mod tests {
    use super::FloatExt;

    #[test]
    fn integrality() {
        assert!(3.0_f64.is_integral());
        assert!((-1e15_f64).is_integral());
        assert!(!0.5_f64.is_integral());
        assert!(!f64::INFINITY.is_integral());
        assert!(!f64::NAN.is_integral());
    }

    #[test]
    fn sign_of_zero_is_positive() {
        assert_eq!(0.0_f64.sign(), 1.0);
        assert_eq!(f64::MIN_POSITIVE.sign(), 1.0);
        assert_eq!((-f64::MIN_POSITIVE).sign(), -1.0);
    }
}

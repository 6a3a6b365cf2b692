// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluation, differentiation and scaling of coefficient slices.
//!
//! Every function here takes coefficients in decreasing-degree order, so
//! `[a_n, ..., a_1, a_0]` stands for `a_n x^n + ... + a_1 x + a_0`. An empty
//! slice is the zero polynomial.

use alloc::vec::Vec;

use num_complex::Complex64;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Evaluates a real polynomial at a real point using Horner's method.
///
/// # Examples
///
/// ```
/// use polyroots::poly::eval_real;
///
/// // x^2 - 3x + 2
/// assert_eq!(eval_real(&[1.0, -3.0, 2.0], 4.0), 6.0);
/// ```
pub fn eval_real(p: &[f64], x: f64) -> f64 {
    p.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Evaluates a real polynomial at a complex point.
///
/// The recurrence is carried out on the real and imaginary parts directly
/// rather than through complex multiplication, since the coefficients have
/// no imaginary part.
pub fn eval_real_at_complex(p: &[f64], z: Complex64) -> Complex64 {
    let Some((&lead, rest)) = p.split_first() else {
        return Complex64::new(0.0, 0.0);
    };
    let (x, y) = (z.re, z.im);
    let mut re = lead;
    let mut im = 0.0;
    for &c in rest {
        let (u, v) = (re, im);
        re = u * x - v * y + c;
        im = v * x + u * y;
    }
    Complex64::new(re, im)
}

/// Evaluates a complex polynomial at a complex point using Horner's method.
pub fn eval_complex(p: &[Complex64], z: Complex64) -> Complex64 {
    p.iter().fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}

/// The derivative of a real polynomial, by the power rule.
///
/// The result has one coefficient fewer than the input; a constant (or
/// empty) input yields an empty result.
pub fn derivative(p: &[f64]) -> Vec<f64> {
    let n = p.len().saturating_sub(1);
    p[..n]
        .iter()
        .enumerate()
        .map(|(i, &c)| (n - i) as f64 * c)
        .collect()
}

/// The derivative of a complex polynomial, by the power rule.
pub fn complex_derivative(p: &[Complex64]) -> Vec<Complex64> {
    let n = p.len().saturating_sub(1);
    p[..n]
        .iter()
        .enumerate()
        .map(|(i, &c)| c * (n - i) as f64)
        .collect()
}

/// Multiplies every coefficient by `s`.
pub fn scale_in_place(p: &mut [f64], s: f64) {
    for c in p {
        *c *= s;
    }
}

/// Multiplies every coefficient by the complex scalar `s`.
pub fn scale_complex_in_place(p: &mut [Complex64], s: Complex64) {
    for c in p {
        *c *= s;
    }
}

/// Backward-error bound for evaluating `p` at `z`: `sum |c_i| |z|^i`.
pub(crate) fn abs_bound(p: &[f64], z: Complex64) -> f64 {
    let r = z.norm();
    p.iter().fold(0.0, |acc, &c| acc * r + c.abs())
}

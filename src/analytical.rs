// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form roots of polynomials up to degree four.
//!
//! The quadratic and cubic solvers follow W. Kahan, "To Solve a Real Cubic
//! Equation" (1986). The quadratic avoids subtracting nearly equal
//! quantities, and for integer coefficients computes its discriminant by an
//! exact reduction. The cubic locates one real root by guarded Newton
//! iteration and hands the deflated quadratic to [`quadratic_roots`]. The
//! quartic is factored into two quadratics through its resolvent cubic.
//!
//! Coefficients are given highest degree first, and roots are returned in
//! no particular order.

use arrayvec::ArrayVec;
use num_complex::Complex64;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::common::FloatExt;
use crate::distinct::{distinct_roots, DISTINCT_ROOT_TOLERANCE};

/// Upper bound on the steps of the integer discriminant reduction.
const MAX_REDUCTION_STEPS: usize = 64;

/// Root of `a x + b = 0`.
///
/// A zero `a` is not an error: the equation simply has no root, and the
/// result is empty.
pub fn linear_root(a: f64, b: f64) -> ArrayVec<Complex64, 1> {
    let mut result = ArrayVec::new();
    if a != 0.0 {
        result.push(Complex64::new(-b / a, 0.0));
    }
    result
}

/// The discriminant `b^2 - a c` of the quadratic form `a x^2 - 2 b x + c`.
///
/// When all three inputs are integers and `a c > 0`, the form is first
/// reduced by the substitution `x -> x + n`, which leaves the discriminant
/// unchanged but shrinks the operands, so that the final `b^2 - a c` is free
/// of cancellation. Otherwise the direct formula is used.
///
/// # Examples
///
/// ```
/// use polyroots::discriminant;
///
/// let n = 94906267.0;
/// // (n + 1)^2 - n (n + 2) = 1, but the direct formula rounds to 0.
/// assert_eq!(discriminant(n, n + 1.0, n + 2.0), 1.0);
/// ```
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    if !(a.is_integral() && b.is_integral() && c.is_integral()) || !(a * c > 0.0) {
        return b * b - a * c;
    }
    let (mut a, mut b, mut c) = (a.abs(), b, c.abs());
    for _ in 0..MAX_REDUCTION_STEPS {
        if a < c {
            core::mem::swap(&mut a, &mut c);
        }
        if c == 0.0 {
            break;
        }
        let n = (b / c).round();
        if n == 0.0 {
            break;
        }
        let alpha = a - n * b;
        if alpha < -a {
            break;
        }
        b -= n * c;
        a = alpha - n * b;
        if !(a > 0.0) {
            break;
        }
    }
    b * b - a * c
}

/// Roots of `a x^2 + b x + c = 0`, with `a` non-zero.
///
/// Always returns two roots. Real roots are computed as `c / r` and `r / a`
/// with `r = -b/2 + sign(-b/2) sqrt(q)`, so neither involves a difference of
/// nearly equal numbers. A negative discriminant yields a conjugate pair.
///
/// # Examples
///
/// ```
/// use polyroots::{quadratic_roots, Complex64};
///
/// let roots = quadratic_roots(1.0, 2.0, 5.0);
/// assert_eq!(roots.as_slice(), [Complex64::new(-1.0, 2.0), Complex64::new(-1.0, -2.0)]);
/// ```
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> ArrayVec<Complex64, 2> {
    let mut result = ArrayVec::new();
    let half_b = -0.5 * b;
    let q = discriminant(a, half_b, c);
    if q < 0.0 {
        let x = half_b / a;
        let y = (-q).sqrt() / a;
        result.push(Complex64::new(x, y));
        result.push(Complex64::new(x, -y));
        return result;
    }
    let r = half_b + half_b.sign() * q.sqrt();
    if r == 0.0 {
        // b and c are both zero.
        result.push(Complex64::new(c / a, 0.0));
        result.push(Complex64::new(-c / a, 0.0));
    } else {
        result.push(Complex64::new(c / r, 0.0));
        result.push(Complex64::new(r / a, 0.0));
    }
    result
}

/// One nested Horner pass over `a x^3 + b x^2 + c x + d`.
///
/// Besides the value and slope, this yields `b1` and `c2`, the coefficients
/// of the quadratic left after dividing out `x`.
struct CubicEval {
    q: f64,
    dq: f64,
    b1: f64,
    c2: f64,
}

impl CubicEval {
    fn new(x: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        let q0 = a * x;
        let b1 = q0 + b;
        let c2 = b1 * x + c;
        Self {
            q: c2 * x + d,
            dq: (q0 + b1) * x + c2,
            b1,
            c2,
        }
    }
}

/// Roots of `a x^3 + b x^2 + c x + d = 0`.
///
/// Returns three roots (counting multiplicity) when `a` is non-zero. If `a`
/// is zero this is the quadratic `b x^2 + c x + d` and two roots are
/// returned. A leading coefficient so small that the cubic overflows near
/// its inflection point yields one root near `-b/a` plus the roots of that
/// quadratic.
///
/// # Examples
///
/// ```
/// use polyroots::cubic_roots;
///
/// let roots = cubic_roots(1.0, -6.0, 11.0, -6.0);
/// let mut re: Vec<f64> = roots.iter().map(|z| z.re).collect();
/// re.sort_by(f64::total_cmp);
/// assert_eq!(re, [1.0, 2.0, 3.0]);
/// ```
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> ArrayVec<Complex64, 3> {
    let mut result = ArrayVec::new();
    let (qa, qb, qc);
    if a == 0.0 {
        (qa, qb, qc) = (b, c, d);
    } else if d == 0.0 {
        result.push(Complex64::new(0.0, 0.0));
        (qa, qb, qc) = (a, b, c);
    } else {
        // Start at the inflection point.
        let mut x = -(b / a) / 3.0;
        let mut eval = CubicEval::new(x, a, b, c, d);
        if !(eval.q.is_finite() && eval.dq.is_finite()) {
            // `a` is negligible next to `b`: one root lies near `-b/a` and the
            // other two barely feel the cubic term.
            result.push(Complex64::new(c / b - b / a, 0.0));
            result.extend(quadratic_roots(b, c, d));
            return result;
        }
        let t = eval.q / a;
        let mut r = t.abs().cbrt();
        let s = if t > 0.0 {
            1.0
        } else if t < 0.0 {
            -1.0
        } else {
            0.0
        };
        let t = -eval.dq / a;
        if t > 0.0 {
            r = 1.324717957244746 * r.max(t.sqrt());
        }
        let mut x0 = x - s * r;
        if x0 != x {
            let den = 1.0 + 100.0 * f64::EPSILON;
            // Newton steps continue only while they keep moving the same way.
            loop {
                x = x0;
                eval = CubicEval::new(x, a, b, c, d);
                x0 = if eval.dq == 0.0 {
                    x
                } else {
                    x - (eval.q / eval.dq) / den
                };
                if !(s * x0 > s * x) {
                    break;
                }
            }
            if a.abs() * x * x > (d / x).abs() {
                eval.c2 = -d / x;
                eval.b1 = (eval.c2 - c) / x;
            }
        }
        result.push(Complex64::new(x, 0.0));
        (qa, qb, qc) = (a, eval.b1, eval.c2);
    }
    result.extend(quadratic_roots(qa, qb, qc));
    result
}

/// Roots of `a x^4 + b x^3 + c x^2 + d x + e = 0`.
///
/// The quartic is depressed to `z^4 + p z^2 + q z + r` and, for each
/// positive root `w` of the resolvent cubic `w^3 + 2p w^2 + (p^2 - 4r) w - q^2`,
/// split into `(z^2 + m z + n)(z^2 - m z + r/n)` with `m = ±sqrt(w)`. The
/// candidate roots are merged with [`distinct_roots`], so repeated roots are
/// reported once and at most four roots are expected.
///
/// When `q = 0` the depressed quartic is biquadratic and is solved as a
/// quadratic in `z^2` instead; this is also the fallback when the resolvent
/// yields no usable factorization. If `a` is zero this delegates to
/// [`cubic_roots`].
///
/// # Examples
///
/// ```
/// use polyroots::quartic_roots;
///
/// // x^4 - x^2 has a double root at zero, reported once.
/// let roots = quartic_roots(1.0, 0.0, -1.0, 0.0, 0.0);
/// let mut re: Vec<f64> = roots.iter().map(|z| z.re).collect();
/// re.sort_by(f64::total_cmp);
/// assert_eq!(re, [-1.0, 0.0, 1.0]);
/// ```
pub fn quartic_roots(a: f64, b: f64, c: f64, d: f64, e: f64) -> SmallVec<[Complex64; 4]> {
    if a == 0.0 {
        return cubic_roots(b, c, d, e).into_iter().collect();
    }
    let p = (c - (3.0 * b * b) / (8.0 * a)) / a;
    let q = (d - (b * c) / (2.0 * a) + (b * b * b) / (8.0 * a * a)) / a;
    let r = (e - (b * d) / (4.0 * a) + (b * b * c) / (16.0 * a * a)
        - (3.0 * b * b * b * b) / (256.0 * a * a * a))
        / a;

    let mut candidates = SmallVec::<[Complex64; 8]>::new();
    if q != 0.0 {
        let resolvent = cubic_roots(1.0, 2.0 * p, p * p - 4.0 * r, -q * q);
        for w in resolvent
            .iter()
            .filter(|w| w.im == 0.0 && w.re > 0.0)
            .map(|w| w.re)
        {
            let m = w.sqrt();
            let n = 0.5 * (p + w);
            for m in [m, -m] {
                let n = n - q / (2.0 * m);
                if n == 0.0 || !n.is_finite() {
                    continue;
                }
                candidates.extend(quadratic_roots(1.0, m, n));
                candidates.extend(quadratic_roots(1.0, -m, r / n));
            }
        }
        candidates.retain(|z| z.is_finite());
    }
    if candidates.is_empty() {
        for y in quadratic_roots(1.0, p, r) {
            let z = y.sqrt();
            candidates.push(z);
            candidates.push(-z);
        }
    }

    let shift = -b / (4.0 * a);
    distinct_roots(candidates, DISTINCT_ROOT_TOLERANCE)
        .into_iter()
        .map(|z| Complex64::new(z.re + shift, z.im))
        .collect()
}

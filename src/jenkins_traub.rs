// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Jenkins-Traub three-stage algorithm for real polynomials.
//!
//! Each pass extracts one linear or quadratic factor from the working
//! polynomial `P` and deflates by it. A pass drives an auxiliary polynomial
//! `K` (one degree lower than `P`) through three stages:
//!
//! 1. no shift, which damps the components of `K` belonging to the large
//!    roots;
//! 2. a fixed quadratic shift centered on a trial point on a circle around
//!    the origin, run until the root or quadratic-factor estimates settle;
//! 3. variable shifts, which refine the estimate to a converged factor.
//!
//! If stage 2 or stage 3 fails, the pass moves the trial point to a new
//! angle, up to [`JenkinsTraubOptions::max_shift_attempts`] times.
//!
//! See M. A. Jenkins and J. F. Traub, "A Three-Stage Algorithm for Real
//! Polynomials Using Quadratic Iteration", SIAM J. Numer. Anal. 7 (1970).

use alloc::vec::Vec;

use arrayvec::ArrayVec;
use num_complex::Complex64;

use crate::analytical::{linear_root, quadratic_roots};
#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::poly::{abs_bound, derivative, eval_real, eval_real_at_complex};
use crate::synthetic::{divide_linear, divide_quadratic};
use crate::Error;

/// Number of no-shift steps applied to `K`.
const NO_SHIFT_STEPS: usize = 5;

/// Stage 2 runs for at most this many steps per degree.
const FIXED_SHIFT_STEPS_PER_DEGREE: usize = 20;

/// Stage 3 runs for at most this many steps per stage 2 step.
const VARIABLE_SHIFT_STEPS_PER_FIXED: usize = 10;

/// Remainders and denominators below this are treated as zero.
const NEGLIGIBLE: f64 = 1e-15;

/// A root accepted on Ward's criterion must also satisfy
/// `|P(z)| <= BACKWARD_TOLERANCE * sum |c_i| |z|^i`.
const BACKWARD_TOLERANCE: f64 = 1e-11;

/// Newton steps that sharpen the root bound, on top of one per degree.
const ROOT_BOUND_STEPS: usize = 64;

/// Parameters for [`jenkins_traub_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JenkinsTraubOptions {
    /// Number of trial shift angles tried for each factor before giving up
    /// with [`Error::ShiftsExhausted`].
    pub max_shift_attempts: usize,
}

impl Default for JenkinsTraubOptions {
    fn default() -> Self {
        Self {
            max_shift_attempts: 20,
        }
    }
}

impl JenkinsTraubOptions {
    /// Builder method for setting the number of shift angles per factor.
    #[must_use]
    pub fn with_max_shift_attempts(mut self, attempts: usize) -> Self {
        self.max_shift_attempts = attempts;
        self
    }
}

/// All roots of a real polynomial, with default options.
///
/// See [`jenkins_traub_with`].
///
/// # Errors
///
/// See [`jenkins_traub_with`].
pub fn jenkins_traub(coeffs: &[f64]) -> Result<Vec<Complex64>, Error> {
    jenkins_traub_with(coeffs, &JenkinsTraubOptions::default())
}

/// All roots of a real polynomial by the Jenkins-Traub method.
///
/// `coeffs` are in decreasing-degree order. A polynomial of degree `n`
/// yields exactly `n` roots, repeated according to multiplicity, in no
/// particular order. Trailing zero coefficients are reported as roots at
/// the origin. Complex roots come in conjugate pairs.
///
/// # Errors
///
/// - [`Error::EmptyPolynomial`] if `coeffs` is empty.
/// - [`Error::LeadingCoefficientZero`] if `coeffs[0]` is zero.
/// - [`Error::ZeroConstantTerm`] if deflation leaves a polynomial with a
///   zero constant term.
/// - [`Error::ShiftsExhausted`] if no trial shift converges for some factor.
///
/// # Examples
///
/// ```
/// use polyroots::jenkins_traub;
///
/// // z^3 - 3z^2 + 3z - 5 = (z - 1)^3 - 4
/// let roots = jenkins_traub(&[1.0, -3.0, 3.0, -5.0]).unwrap();
/// assert_eq!(roots.len(), 3);
/// let real = roots.iter().find(|z| z.im == 0.0).unwrap();
/// assert!((real.re - (1.0 + 4.0_f64.cbrt())).abs() < 1e-13);
/// ```
pub fn jenkins_traub_with(
    coeffs: &[f64],
    options: &JenkinsTraubOptions,
) -> Result<Vec<Complex64>, Error> {
    let Some(&lead) = coeffs.first() else {
        return Err(Error::EmptyPolynomial);
    };
    if lead == 0.0 {
        return Err(Error::LeadingCoefficientZero);
    }
    let mut roots = Vec::with_capacity(coeffs.len() - 1);

    let last = coeffs.iter().rposition(|&c| c != 0.0).unwrap_or(0);
    roots.resize(coeffs.len() - 1 - last, Complex64::new(0.0, 0.0));
    let mut p: Vec<f64> = coeffs[..=last].iter().map(|&c| c / lead).collect();
    let scale = scale_roots(&mut p);
    let first_found = roots.len();

    let limit = FIXED_SHIFT_STEPS_PER_DEGREE * (p.len() - 1);
    while p.len() > 3 {
        let search = FactorSearch {
            p: &p,
            limit,
            max_attempts: options.max_shift_attempts,
            km: Vec::new(),
            radius: 0.0,
        };
        let factor = search.run()?;
        log::debug!("jenkins-traub: extracted {factor:?} from degree {}", p.len() - 1);
        p = match factor {
            Factor::Linear(s) => {
                roots.push(Complex64::new(s, 0.0));
                divide_linear(&p, s).0
            }
            Factor::Quadratic { u, v, pair } => {
                roots.extend(pair);
                divide_quadratic(&p, u, v).0
            }
        };
    }
    match *p.as_slice() {
        [a, b] => roots.extend(linear_root(a, b)),
        [a, b, c] => roots.extend(quadratic_roots(a, b, c)),
        _ => {}
    }

    for z in &mut roots[first_found..] {
        *z *= scale;
    }
    Ok(roots)
}

/// Substitutes `z = scale * y` in the monic `p`, with `scale` a power of two
/// near the geometric mean of the root magnitudes, and returns `scale`.
///
/// The fixed thresholds used by the stages then apply to roots of order one.
/// Since `scale` is a power of two, mapping roots back is exact.
fn scale_roots(p: &mut [f64]) -> f64 {
    let n = p.len() - 1;
    if n == 0 {
        return 1.0;
    }
    let exponent = (p[n].abs().ln() / (n as f64 * core::f64::consts::LN_2)).round();
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the exponent is clamped well inside i32"
    )]
    let scale = 2.0_f64.powi(exponent.clamp(-1000.0, 1000.0) as i32);
    let mut factor = 1.0;
    for c in &mut p[1..] {
        factor /= scale;
        *c *= factor;
    }
    scale
}

/// A factor extracted from the working polynomial.
#[derive(Debug)]
enum Factor {
    /// `z - s`.
    Linear(f64),
    /// `z^2 + u z + v`, together with its two roots.
    Quadratic { u: f64, v: f64, pair: [Complex64; 2] },
}

/// What stage 2 hands to stage 3.
struct Signal {
    k: Vec<f64>,
    /// Root estimate from the last fixed-shift step.
    t: Complex64,
    /// Quadratic factor estimate from the last step, if it was well defined.
    sigma: Option<(f64, f64)>,
    /// Whether the quadratic sequence, rather than the root sequence, settled.
    quadratic: bool,
    /// Number of fixed-shift steps taken.
    steps: usize,
}

/// States of the search for one factor.
enum Stage {
    NoShift,
    FixedShift {
        attempt: usize,
    },
    VariableShiftLinear {
        attempt: usize,
        signal: Signal,
        /// Whether a failure should retry as a quadratic factor.
        retry: bool,
    },
    VariableShiftQuadratic {
        attempt: usize,
        signal: Signal,
        u: f64,
        v: f64,
        /// Whether a failure should retry as a linear factor.
        retry: bool,
    },
    Converged(Factor),
    Exhausted,
}

/// Finds one factor of a monic polynomial of degree at least three.
struct FactorSearch<'a> {
    p: &'a [f64],
    /// Step cap for stage 2.
    limit: usize,
    max_attempts: usize,
    /// `K` after the no-shift stage.
    km: Vec<f64>,
    /// Lower bound on the root moduli, the radius of the trial points.
    radius: f64,
}

impl FactorSearch<'_> {
    fn run(mut self) -> Result<Factor, Error> {
        let mut stage = Stage::NoShift;
        loop {
            stage = match self.step(stage)? {
                Stage::Converged(factor) => return Ok(factor),
                Stage::Exhausted => {
                    return Err(Error::ShiftsExhausted {
                        attempts: self.max_attempts,
                    })
                }
                next => next,
            };
        }
    }

    fn step(&mut self, stage: Stage) -> Result<Stage, Error> {
        Ok(match stage {
            Stage::NoShift => {
                self.km = no_shift(self.p, NO_SHIFT_STEPS)?;
                self.radius = root_bound(self.p);
                log::trace!("jenkins-traub: root bound {}", self.radius);
                Stage::FixedShift { attempt: 0 }
            }
            Stage::FixedShift { attempt } if attempt >= self.max_attempts => Stage::Exhausted,
            Stage::FixedShift { attempt } => {
                let angle = (49.0 + 94.0 * attempt as f64).to_radians();
                let (sin, cos) = angle.sin_cos();
                let s = Complex64::new(self.radius * cos, self.radius * sin);
                match self.fixed_shift(s) {
                    None => {
                        log::trace!("jenkins-traub: fixed shift {attempt} did not settle");
                        Stage::FixedShift {
                            attempt: attempt + 1,
                        }
                    }
                    Some(signal) => match (signal.quadratic, signal.sigma) {
                        (true, Some((u, v))) => Stage::VariableShiftQuadratic {
                            attempt,
                            signal,
                            u,
                            v,
                            retry: true,
                        },
                        _ => Stage::VariableShiftLinear {
                            attempt,
                            signal,
                            retry: true,
                        },
                    },
                }
            }
            Stage::VariableShiftLinear {
                attempt,
                signal,
                retry,
            } => match self.variable_shift_linear(&signal) {
                Some(s) => Stage::Converged(Factor::Linear(s)),
                None if retry => {
                    log::trace!("jenkins-traub: linear shift failed, trying quadratic");
                    let t = signal.t;
                    Stage::VariableShiftQuadratic {
                        attempt,
                        signal,
                        u: -2.0 * t.re,
                        v: t.norm_sqr(),
                        retry: false,
                    }
                }
                None => Stage::FixedShift {
                    attempt: attempt + 1,
                },
            },
            Stage::VariableShiftQuadratic {
                attempt,
                signal,
                u,
                v,
                retry,
            } => match self.variable_shift_quadratic(&signal, u, v) {
                Some(factor) => Stage::Converged(factor),
                None if retry => {
                    log::trace!("jenkins-traub: quadratic shift failed, trying linear");
                    Stage::VariableShiftLinear {
                        attempt,
                        signal,
                        retry: false,
                    }
                }
                None => Stage::FixedShift {
                    attempt: attempt + 1,
                },
            },
            done @ (Stage::Converged(_) | Stage::Exhausted) => done,
        })
    }

    /// Stage 2: fixed quadratic shift centered on `s`.
    fn fixed_shift(&self, s: Complex64) -> Option<Signal> {
        let p = self.p;
        let u = -2.0 * s.re;
        let v = s.re * s.re + s.im * s.im;
        let (qp, [b, r0]) = divide_quadratic(p, u, v);
        let a = r0 - b * u;
        let p_at_s = Complex64::new(a - b * s.re, b * s.im);

        let mut k = self.km.clone();
        let mut ts = Recent::new();
        let mut vs = Recent::new();
        for step in 0..=self.limit {
            let (qk, [d, r0]) = divide_quadratic(&k, u, v);
            let c = r0 - d * u;
            let k_at_s = Complex64::new(c - d * s.re, d * s.im);
            let t = s - p_at_s * k[0] / k_at_s;
            ts.push(t);
            let rem = Remainders { a, b, c, d };
            let sigma = sigma_estimate(&rem, u, v, &k, p);
            match sigma {
                Some((_, v_next)) => vs.push(v_next),
                None => vs.clear(),
            }
            let linear = ts
                .last3()
                .is_some_and(|h| settling(h.map(|z| z.norm()), |i, j| (h[i] - h[j]).norm()));
            let quadratic = vs
                .last3()
                .is_some_and(|h| settling(h.map(f64::abs), |i, j| (h[i] - h[j]).abs()));
            if linear || quadratic {
                log::trace!(
                    "jenkins-traub: fixed shift settled after {step} steps ({})",
                    if quadratic { "quadratic" } else { "linear" }
                );
                return Some(Signal {
                    k,
                    t,
                    sigma,
                    quadratic,
                    steps: step,
                });
            }
            k = next_fixed_shift_k(&k, &qp, &qk, &rem, u, v);
        }
        None
    }

    /// Stage 3 for a real root, starting from the real part of `t`.
    fn variable_shift_linear(&self, signal: &Signal) -> Option<f64> {
        let p = self.p;
        let mut k = signal.k.clone();
        let mut s = signal.t.re;
        let mut history = Recent::new();
        for _ in 0..VARIABLE_SHIFT_STEPS_PER_FIXED * signal.steps {
            history.push(s);
            let (qp, p_at_s) = divide_linear(p, s);
            if p_at_s.abs() < NEGLIGIBLE {
                return Some(s);
            }
            if let Some(h) = history.last3() {
                let z = Complex64::new(h[1], 0.0);
                if ward(h[0], h[1], h[2]) && backward_ok(p, z) {
                    return Some(h[1]);
                }
            }
            let (qk, k_at_s) = divide_linear(&k, s);
            let t = -k_at_s / p_at_s;
            let mut next = alloc::vec![0.0; k.len()];
            add_aligned(&mut next, &qp, t);
            add_aligned(&mut next, &qk, 1.0);
            make_monic(&mut next);
            k = next;
            s -= p_at_s * k[0] / eval_real(&k, s);
        }
        None
    }

    /// Stage 3 for a quadratic factor, starting from `z^2 + u z + v`.
    fn variable_shift_quadratic(&self, signal: &Signal, mut u: f64, mut v: f64) -> Option<Factor> {
        let p = self.p;
        let mut k = signal.k.clone();
        let mut first = Recent::new();
        let mut second = Recent::new();
        let mut previous = (u, v);
        for _ in 0..VARIABLE_SHIFT_STEPS_PER_FIXED * signal.steps {
            let pair = quadratic_roots(1.0, u, v);
            let pair = [pair[0], pair[1]];
            first.push(pair[0]);
            second.push(pair[1]);

            let (qp, [b, r0]) = divide_quadratic(p, u, v);
            if b.abs() < NEGLIGIBLE && r0.abs() < NEGLIGIBLE {
                return Some(Factor::Quadratic { u, v, pair });
            }
            if let (Some(h1), Some(h2)) = (first.last3(), second.last3()) {
                let settled = |h: [Complex64; 3]| {
                    ward_distance((h[2] - h[1]).norm(), (h[1] - h[0]).norm(), h[1].norm())
                        && backward_ok(p, h[1])
                };
                if settled(h1) && settled(h2) {
                    let (u, v) = previous;
                    return Some(Factor::Quadratic {
                        u,
                        v,
                        pair: [h1[1], h2[1]],
                    });
                }
            }

            let a = r0 - b * u;
            let (qk, [d, r0]) = divide_quadratic(&k, u, v);
            let c = r0 - d * u;
            let rem = Remainders { a, b, c, d };
            let (u_next, v_next) = sigma_estimate(&rem, u, v, &k, p)?;
            k = next_fixed_shift_k(&k, &qp, &qk, &rem, u_next, v_next);
            previous = (u, v);
            (u, v) = (u_next, v_next);
        }
        None
    }
}

/// The last three values of a sequence.
struct Recent<T>(ArrayVec<T, 3>);

impl<T: Copy> Recent<T> {
    fn new() -> Self {
        Self(ArrayVec::new())
    }

    fn push(&mut self, value: T) {
        if self.0.is_full() {
            self.0.remove(0);
        }
        self.0.push(value);
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    /// Oldest first.
    fn last3(&self) -> Option<[T; 3]> {
        match *self.0.as_slice() {
            [a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }
}

/// Remainder coefficients of `P` and `K` divided by `z^2 + u z + v`, in the
/// form `P = Q_P sigma + b (z + u) + a` and `K = Q_K sigma + d (z + u) + c`.
struct Remainders {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

/// The stage 2 convergence test: both of the last two steps are at most
/// half the modulus of the iterate they start from.
fn settling(moduli: [f64; 3], step: impl Fn(usize, usize) -> f64) -> bool {
    step(2, 1) <= 0.5 * moduli[1] && step(1, 0) <= 0.5 * moduli[0]
}

/// Ward's criterion: the latest correction is small, absolutely for tiny
/// roots and relatively otherwise, and no longer shrinking.
fn ward_distance(latest: f64, previous: f64, modulus: f64) -> bool {
    let small = if modulus < 1e-4 {
        latest <= 1e-7
    } else {
        latest / modulus <= 1e-3
    };
    small && latest >= previous
}

fn ward(x0: f64, x1: f64, x2: f64) -> bool {
    ward_distance((x2 - x1).abs(), (x1 - x0).abs(), x1.abs())
}

fn backward_ok(p: &[f64], z: Complex64) -> bool {
    eval_real_at_complex(p, z).norm() <= BACKWARD_TOLERANCE * abs_bound(p, z)
}

/// Divides by the leading coefficient, unless it vanishes.
fn make_monic(k: &mut [f64]) {
    let lead = k[0];
    if lead != 0.0 && lead.is_finite() {
        for c in k.iter_mut() {
            *c /= lead;
        }
    }
}

/// Adds `scale * src` to `dst`, aligning the constant terms.
fn add_aligned(dst: &mut [f64], src: &[f64], scale: f64) {
    let offset = dst.len() - src.len();
    for (d, s) in dst[offset..].iter_mut().zip(src) {
        *d += scale * s;
    }
}

/// Stage 1: `K_{i+1}(z) = (K_i(z) - K_i(0) / P(0) P(z)) / z`, starting from `P'`.
fn no_shift(p: &[f64], steps: usize) -> Result<Vec<f64>, Error> {
    let p0 = p[p.len() - 1];
    if p0 == 0.0 {
        return Err(Error::ZeroConstantTerm);
    }
    let mut k = derivative(p);
    let n = k.len() - 1;
    for _ in 0..steps {
        let t = -k[n] / p0;
        for i in (1..=n).rev() {
            k[i] = k[i - 1] + t * p[i];
        }
        k[0] = t * p[0];
    }
    make_monic(&mut k);
    Ok(k)
}

/// `K` for the next fixed or variable quadratic shift.
fn next_fixed_shift_k(
    k: &[f64],
    qp: &[f64],
    qk: &[f64],
    rem: &Remainders,
    u: f64,
    v: f64,
) -> Vec<f64> {
    let Remainders { a, b, c, d } = *rem;
    let alpha = a * a + u * a * b + v * b * b;
    let beta = -(a * c + u * a * d + v * b * d);
    let gamma = b * c - a * d;
    let (qk_scale, qz_scale, qp_scale) = if gamma.abs() > NEGLIGIBLE {
        (alpha / gamma, 1.0, beta / gamma)
    } else {
        (1.0, gamma / alpha, beta / alpha)
    };
    let n = k.len() - 1;
    let mut next = alloc::vec![0.0; n + 1];
    add_aligned(&mut next, qk, qk_scale);
    add_aligned(&mut next, qp, qp_scale);
    add_aligned(&mut next[..n], qp, qz_scale);
    next[n] += qz_scale * b;
    make_monic(&mut next);
    next
}

/// New quadratic factor estimate, or `None` if its denominator vanishes.
fn sigma_estimate(rem: &Remainders, u: f64, v: f64, k: &[f64], p: &[f64]) -> Option<(f64, f64)> {
    let Remainders { a, b, c, d } = *rem;
    let (kn, pn) = (k.len() - 1, p.len() - 1);
    let a0 = -k[kn] / p[pn];
    let a1 = -(k[kn - 1] + a0 * p[pn - 1]) / p[pn];
    let a_1 = b * c - a * d;
    let a_2 = a * c + u * a * d + v * b * d;
    let c2 = a0 * a_2;
    let c3 = a0 * a0 * (a * a + u * a * b + v * b * b);
    let c4 = v * a1 * a_1 - c2 - c3;
    let c1 = c * c + u * c * d + v * d * d + a0 * (a * c + u * b * c + v * b * d) - c4;
    if c1.abs() < NEGLIGIBLE {
        return None;
    }
    let du = -(u * (c2 + c3) + v * (a0 * a_1 + a1 * a_2));
    let dv = v * c4;
    Some((u + du / c1, v + dv / c1))
}

/// Lower bound on the moduli of the roots of `p` (Cauchy).
///
/// This is the positive root of `|p_n| z^n + ... + |p_1| z - |p_0|`, found
/// by halving an upper estimate until it brackets the root within a factor
/// of two, then sharpening with Newton's method until successive estimates
/// agree to about two digits.
///
/// The bound polynomial is increasing and convex on the positive axis, so
/// Newton started from the upper end of the bracket decreases monotonically
/// onto the root. Far above the root each step shrinks the estimate by about
/// `1/n`, hence the step budget grows with the degree.
fn root_bound(p: &[f64]) -> f64 {
    let nn = p.len() - 1;
    let mut pt: Vec<f64> = p.iter().map(|c| c.abs()).collect();
    pt[nn] = -pt[nn];

    let mut x = ((-pt[nn]).ln() - pt[0].ln()) / nn as f64;
    x = x.exp();
    if pt[nn - 1] != 0.0 {
        x = x.min(-pt[nn] / pt[nn - 1]);
    }
    if !x.is_finite() {
        x = f64::MAX;
    }
    // The bound polynomial is non-negative at the initial estimate.
    let mut upper = x;
    x *= 0.5;
    while eval_real(&pt, x) > 0.0 {
        upper = x;
        x *= 0.5;
    }

    let mut x1 = upper;
    for _ in 0..ROOT_BOUND_STEPS + nn {
        x = x1;
        x1 = newton_step(&pt, x);
        let change = (1.0 - x1 / x).abs();
        if change.is_nan() || change <= 0.005 {
            break;
        }
    }
    x1
}

/// One Newton step on a polynomial, evaluating value and slope together.
fn newton_step(p: &[f64], x: f64) -> f64 {
    let nn = p.len() - 1;
    let mut f = p[0];
    let mut df = f;
    for &c in &p[1..nn] {
        f = f * x + c;
        df = df * x + f;
    }
    f = f * x + p[nn];
    x - f / df
}

// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root finders for arbitrary scalar functions.
//!
//! These know nothing about polynomial structure; `f` is any function of
//! one real variable.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::Error;

/// Parameters for [`bisection`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BisectionOptions {
    /// Lower end of the bracket.
    pub lower_bound: f64,
    /// Upper end of the bracket.
    pub upper_bound: f64,
    /// Maximum number of halvings.
    pub max_iterations: usize,
    /// A function value below this counts as a root.
    pub root_tolerance: f64,
    /// A bracket narrower than this counts as converged.
    pub step_tolerance: f64,
}

impl Default for BisectionOptions {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl BisectionOptions {
    /// Options for bisecting `[lower_bound, upper_bound]`, with default tolerances.
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            max_iterations: 100,
            root_tolerance: 1e-14,
            step_tolerance: 1e-12,
        }
    }

    /// Builder method for setting the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method for setting the root tolerance.
    #[must_use]
    pub fn with_root_tolerance(mut self, root_tolerance: f64) -> Self {
        self.root_tolerance = root_tolerance;
        self
    }

    /// Builder method for setting the step tolerance.
    #[must_use]
    pub fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }
}

/// Finds a root of `f` in a bracket by repeated halving.
///
/// Each step evaluates `f` at the midpoint and keeps the half whose end
/// points still differ in sign. An exact zero at the lower end or at a
/// midpoint is returned as is.
///
/// Iteration stops once the bracket is narrower than `step_tolerance` and
/// `|f|` at the lower end or at the latest midpoint is below
/// `root_tolerance`, or after `max_iterations` halvings (which is logged as
/// a warning). The result is whichever end of the final bracket has the
/// smaller `|f|`.
///
/// If `f` has the same sign at both ends, the bracket shrinks towards the
/// upper bound and the result is meaningless.
///
/// # Errors
///
/// [`Error::InvalidBracket`] if either bound is not finite or
/// `lower_bound >= upper_bound`.
///
/// # Examples
///
/// ```
/// use polyroots::{bisection, BisectionOptions};
///
/// let options = BisectionOptions::new(1.0, 2.0).with_max_iterations(200);
/// let root = bisection(|t| t * t - 2.0, &options).unwrap();
/// assert!((root - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn bisection(
    mut f: impl FnMut(f64) -> f64,
    options: &BisectionOptions,
) -> Result<f64, Error> {
    let (mut lower, mut upper) = (options.lower_bound, options.upper_bound);
    if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
        return Err(Error::InvalidBracket { lower, upper });
    }
    let mut f_lower = f(lower);
    let mut iterations = 0;
    loop {
        let mid = 0.5 * (lower + upper);
        let f_mid = f(mid);
        iterations += 1;
        let test = f_lower * f_mid;
        if test < 0.0 {
            upper = mid;
        } else if test > 0.0 {
            lower = mid;
            f_lower = f_mid;
        } else {
            return Ok(if f_lower == 0.0 { lower } else { mid });
        }
        log::trace!("bisection step {iterations}: [{lower}, {upper}]");
        if (lower - upper).abs() < options.step_tolerance
            && (f_lower.abs() < options.root_tolerance || f_mid.abs() < options.root_tolerance)
        {
            break;
        }
        if iterations >= options.max_iterations {
            log::warn!("bisection: reached the cap of {iterations} iterations");
            break;
        }
    }
    Ok(if f(lower).abs() > f(upper).abs() {
        upper
    } else {
        lower
    })
}

/// A finite-difference approximation of a derivative, with its step size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FiniteDifference {
    /// `(f(t + dt) - f(t - dt)) / 2dt`.
    Central(f64),
    /// `(f(t) - f(t - dt)) / dt`.
    Backward(f64),
    /// `(f(t + dt) - f(t)) / dt`.
    Forward(f64),
}

impl FiniteDifference {
    /// The approximate derivative of `f` at `t`.
    pub fn eval(self, mut f: impl FnMut(f64) -> f64, t: f64) -> f64 {
        match self {
            Self::Central(dt) => (f(t + dt) - f(t - dt)) / (2.0 * dt),
            Self::Backward(dt) => (f(t) - f(t - dt)) / dt,
            Self::Forward(dt) => (f(t + dt) - f(t)) / dt,
        }
    }
}

/// Parameters for [`newton`] and [`newton_numerical`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonOptions {
    /// Starting point.
    pub initial_value: f64,
    /// Iteration stops once a step is shorter than this.
    pub error_tolerance: f64,
    /// A function value below this counts as a root. A derivative below this
    /// counts as zero.
    pub root_tolerance: f64,
    /// Maximum number of steps.
    pub max_iterations: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self::new(0.0, 1e-12)
    }
}

impl NewtonOptions {
    /// Options starting from `initial_value`, with default root tolerance and
    /// iteration cap.
    pub fn new(initial_value: f64, error_tolerance: f64) -> Self {
        Self {
            initial_value,
            error_tolerance,
            root_tolerance: 1e-14,
            max_iterations: 100,
        }
    }

    /// Builder method for setting the root tolerance.
    #[must_use]
    pub fn with_root_tolerance(mut self, root_tolerance: f64) -> Self {
        self.root_tolerance = root_tolerance;
        self
    }

    /// Builder method for setting the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Finds a root of `f` by Newton's method, given its derivative `df`.
///
/// Returns the current point as soon as `|f|` there is below
/// `root_tolerance`. Otherwise steps until a step is shorter than
/// `error_tolerance` or `max_iterations` steps have been taken (which is
/// logged as a warning), and returns the last iterate.
///
/// # Errors
///
/// [`Error::ZeroDerivative`] if `|df|` falls below `root_tolerance` at an
/// iterate that is not itself a root.
///
/// # Examples
///
/// ```
/// use polyroots::{newton, NewtonOptions};
///
/// let root = newton(|t| t * t - 2.0, |t| 2.0 * t, &NewtonOptions::new(1.0, 1e-12)).unwrap();
/// assert!((root - 2.0_f64.sqrt()).abs() < 1e-15);
/// ```
pub fn newton(
    mut f: impl FnMut(f64) -> f64,
    mut df: impl FnMut(f64) -> f64,
    options: &NewtonOptions,
) -> Result<f64, Error> {
    newton_iterate(|x| (f(x), df(x)), options)
}

/// Finds a root of `f` by Newton's method, approximating the derivative by
/// finite differences.
///
/// See [`newton`] for the stopping rules.
///
/// # Errors
///
/// [`Error::ZeroDerivative`] if the approximate derivative falls below
/// `root_tolerance` at an iterate that is not itself a root.
///
/// # Examples
///
/// ```
/// use polyroots::{newton_numerical, FiniteDifference, NewtonOptions};
///
/// let options = NewtonOptions::new(1.0, 1e-12);
/// let root = newton_numerical(f64::cos, FiniteDifference::Central(1e-6), &options).unwrap();
/// assert!((root - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn newton_numerical(
    mut f: impl FnMut(f64) -> f64,
    difference: FiniteDifference,
    options: &NewtonOptions,
) -> Result<f64, Error> {
    newton_iterate(|x| (f(x), difference.eval(&mut f, x)), options)
}

/// The Newton loop, with `f` and its slope supplied together.
fn newton_iterate(
    mut f_df: impl FnMut(f64) -> (f64, f64),
    options: &NewtonOptions,
) -> Result<f64, Error> {
    let mut x1 = options.initial_value;
    let mut iterations = 0;
    loop {
        let x0 = x1;
        let (f0, df0) = f_df(x0);
        if f0.abs() < options.root_tolerance {
            return Ok(x0);
        }
        if df0.abs() < options.root_tolerance {
            return Err(Error::ZeroDerivative { x: x0 });
        }
        x1 = x0 - f0 / df0;
        iterations += 1;
        log::trace!("newton step {iterations}: {x1}");
        if (x1 - x0).abs() < options.error_tolerance {
            return Ok(x1);
        }
        if iterations >= options.max_iterations {
            log::warn!("newton: reached the cap of {iterations} iterations");
            return Ok(x1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decaying(t: f64) -> f64 {
        (-t).exp() * (3.2 * t.sin() - 0.5 * t.cos())
    }

    #[test]
    fn bisection_decaying_oscillation() {
        let options = BisectionOptions::new(3.0, 4.0)
            .with_max_iterations(11)
            .with_root_tolerance(1e-3)
            .with_step_tolerance(1e-3);
        let root = bisection(decaying, &options).unwrap();
        assert_eq!(root, 3.296875);
        assert!((root - 3.29658939551374).abs() < 1e-3);
    }

    #[test]
    fn bisection_sqrt() {
        let options = BisectionOptions::new(1.0, 2.0)
            .with_max_iterations(9)
            .with_root_tolerance(0.01)
            .with_step_tolerance(0.01);
        let root = bisection(|t| t * t - 3.0, &options).unwrap();
        assert!((root - 3.0_f64.sqrt()).abs() < 0.01, "{root}");

        let options = BisectionOptions::new(0.0, 2.0).with_max_iterations(200);
        let root = bisection(|t| t * t - 2.0, &options).unwrap();
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-12, "{root}");
    }

    #[test]
    fn bisection_exact_hit() {
        // The first midpoint is the root.
        let root = bisection(|t| t - 1.0, &BisectionOptions::new(0.0, 2.0)).unwrap();
        assert_eq!(root, 1.0);
        // A root at the lower bound.
        let root = bisection(|t| t, &BisectionOptions::new(0.0, 3.0)).unwrap();
        assert_eq!(root, 0.0);
    }

    #[test]
    fn bisection_counts_evaluations() {
        let mut calls = 0;
        let options = BisectionOptions::new(0.0, 1.0).with_max_iterations(5);
        let _ = bisection(
            |t| {
                calls += 1;
                t - 0.3
            },
            &options,
        );
        // One at the lower bound, five midpoints, two to pick the result.
        assert_eq!(calls, 8);
    }

    #[test]
    fn bisection_rejects_bad_brackets() {
        for (lower, upper) in [(1.0, 1.0), (2.0, 1.0), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            let result = bisection(|t| t, &BisectionOptions::new(lower, upper));
            assert!(
                matches!(result, Err(Error::InvalidBracket { .. })),
                "[{lower}, {upper}] gave {result:?}"
            );
        }
    }

    #[test]
    fn newton_sqrt() {
        let options = NewtonOptions::new(1.0, 1e-12);
        let root = newton(|t| t * t - 2.0, |t| 2.0 * t, &options).unwrap();
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-15, "{root}");
        // Starting on the root returns it unchanged.
        let options = NewtonOptions::new(3.0, 1e-12);
        assert_eq!(newton(|t| t - 3.0, |_| 1.0, &options), Ok(3.0));
    }

    #[test]
    fn newton_zero_derivative() {
        let options = NewtonOptions::new(0.0, 1e-12);
        assert_eq!(
            newton(|t| t * t + 1.0, |t| 2.0 * t, &options),
            Err(Error::ZeroDerivative { x: 0.0 })
        );
    }

    #[test]
    fn newton_iteration_cap() {
        // Newton on the cube root cycles outwards and never converges.
        let options = NewtonOptions::new(1.0, 1e-12).with_max_iterations(3);
        let root = newton(|t: f64| t.cbrt(), |t| t.cbrt() / (3.0 * t), &options).unwrap();
        assert!((root + 8.0).abs() < 1e-9, "{root}");
    }

    #[test]
    fn newton_numerical_differences() {
        let options = NewtonOptions::new(3.5, 1e-12);
        for difference in [
            FiniteDifference::Central(1e-6),
            FiniteDifference::Backward(1e-7),
            FiniteDifference::Forward(1e-7),
        ] {
            let root = newton_numerical(decaying, difference, &options).unwrap();
            assert!((root - 3.29658939551374).abs() < 1e-10, "{difference:?}: {root}");
        }
    }

    #[test]
    fn finite_difference_eval() {
        let f = |t: f64| t * t;
        assert!((FiniteDifference::Central(1e-3).eval(f, 2.0) - 4.0).abs() < 1e-9);
        assert!((FiniteDifference::Forward(1e-3).eval(f, 2.0) - 4.001).abs() < 1e-9);
        assert!((FiniteDifference::Backward(1e-3).eval(f, 2.0) - 3.999).abs() < 1e-9);
    }
}

// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simultaneous iteration for all roots of a complex polynomial.

use alloc::vec::Vec;

use num_complex::Complex64;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::poly::eval_complex;
use crate::Error;

/// Seed for the initial guesses; successive powers give a spiral of
/// distinct, non-symmetric starting points.
const SEED: Complex64 = Complex64::new(0.4, 0.9);

/// Below this length a step is measured with the Manhattan norm.
const SMALL_STEP: f64 = 1e-12;

/// Parameters for [`durand_kerner_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurandKernerOptions {
    /// Iteration stops once the combined step length of a sweep is below this.
    pub tolerance: f64,
    /// Maximum number of sweeps before reporting [`Error::NoConvergence`].
    pub max_iterations: usize,
}

impl Default for DurandKernerOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-14,
            max_iterations: 10_000,
        }
    }
}

impl DurandKernerOptions {
    /// Builder method for setting the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method for setting the sweep limit.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// All roots of a complex polynomial, with default options.
///
/// See [`durand_kerner_with`].
///
/// # Errors
///
/// See [`durand_kerner_with`].
pub fn durand_kerner(coeffs: &[Complex64]) -> Result<Vec<Complex64>, Error> {
    durand_kerner_with(coeffs, &DurandKernerOptions::default())
}

/// All roots of a complex polynomial by Durand-Kerner (Weierstrass) iteration.
///
/// `coeffs` are in decreasing-degree order; a polynomial of degree `n`
/// yields exactly `n` roots, in no particular order. Every sweep replaces
/// each guess `z_i` by `z_i - P(z_i) / prod_{j != i} (z_i - z_j)`, using the
/// updated guesses as soon as they are available.
///
/// Convergence is linear rather than quadratic near multiple roots, so a
/// polynomial with repeated roots may need a looser tolerance.
///
/// # Errors
///
/// - [`Error::EmptyPolynomial`] if `coeffs` is empty.
/// - [`Error::LeadingCoefficientZero`] if `coeffs[0]` is zero.
/// - [`Error::NoConvergence`] if the tolerance is not met within
///   `max_iterations` sweeps.
///
/// # Examples
///
/// ```
/// use polyroots::{durand_kerner, Complex64};
///
/// // z^2 + 1
/// let coeffs = [1.0, 0.0, 1.0].map(|c| Complex64::new(c, 0.0));
/// let roots = durand_kerner(&coeffs).unwrap();
/// assert!(roots.iter().all(|z| (z.norm() - 1.0).abs() < 1e-12 && z.re.abs() < 1e-12));
/// ```
pub fn durand_kerner_with(
    coeffs: &[Complex64],
    options: &DurandKernerOptions,
) -> Result<Vec<Complex64>, Error> {
    let Some(&lead) = coeffs.first() else {
        return Err(Error::EmptyPolynomial);
    };
    if lead == Complex64::new(0.0, 0.0) {
        return Err(Error::LeadingCoefficientZero);
    }
    let monic: Vec<Complex64> = coeffs.iter().map(|&c| c / lead).collect();
    let n = monic.len() - 1;

    let mut roots = Vec::with_capacity(n);
    let mut guess = SEED;
    for _ in 0..n {
        roots.push(guess);
        guess *= SEED;
    }
    if n == 0 {
        return Ok(roots);
    }

    for iteration in 0..options.max_iterations {
        let mut total: f64 = 0.0;
        for i in 0..n {
            let z = roots[i];
            let denom = roots
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, (_, &w)| acc * (z - w));
            let step = eval_complex(&monic, z) / denom;
            roots[i] = z - step;
            let manhattan = step.re.abs() + step.im.abs();
            let length = if manhattan < SMALL_STEP {
                manhattan
            } else {
                step.re.hypot(step.im)
            };
            total = total.hypot(length);
        }
        log::trace!("durand-kerner sweep {iteration}: step {total:e}");
        if total < options.tolerance {
            log::debug!("durand-kerner converged after {} sweeps", iteration + 1);
            return Ok(roots);
        }
    }
    Err(Error::NoConvergence {
        iterations: options.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::assert_roots_near;
    use crate::poly::eval_real_at_complex;
    use alloc::vec;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn real(coeffs: &[f64]) -> Vec<Complex64> {
        coeffs.iter().map(|&c| Complex64::new(c, 0.0)).collect()
    }

    #[test]
    fn cubic_with_complex_pair() {
        let roots = durand_kerner(&real(&[1.0, -3.0, 3.0, -5.0])).unwrap();
        assert_roots_near(
            &roots,
            &[(0.2063, -1.3747), (0.2063, 1.3747), (2.5874, 0.0)],
            1e-4,
        );
        // 1 + 4^(1/3) and 1 - 4^(1/3) (1 -+ i sqrt(3)) / 2, to full precision.
        let c = 4.0_f64.cbrt();
        let (re, im) = (1.0 - 0.5 * c, 0.5 * c * 3.0_f64.sqrt());
        assert_roots_near(&roots, &[(1.0 + c, 0.0), (re, im), (re, -im)], 1e-13);
    }

    #[test]
    fn complex_coefficients() {
        // (z - i)(z - 2)
        let i = Complex64::new(0.0, 1.0);
        let coeffs = [Complex64::new(1.0, 0.0), -(i + 2.0), i * 2.0];
        let roots = durand_kerner(&coeffs).unwrap();
        assert_roots_near(&roots, &[(0.0, 1.0), (2.0, 0.0)], 1e-12);
    }

    #[test]
    fn repeated_roots_need_a_looser_tolerance() {
        // 5 (z + 1)^2 (z - 2)^3
        let coeffs = real(&[5.0, -20.0, 5.0, 50.0, -20.0, -40.0]);
        let strict = DurandKernerOptions::default().with_max_iterations(500);
        assert_eq!(
            durand_kerner_with(&coeffs, &strict),
            Err(Error::NoConvergence { iterations: 500 })
        );

        let loose = DurandKernerOptions::default().with_tolerance(1e-6);
        let roots = durand_kerner_with(&coeffs, &loose).unwrap();
        let expected = [(-1.0, 0.0), (-1.0, 0.0), (2.0, 0.0), (2.0, 0.0), (2.0, 0.0)];
        assert_roots_near(&roots, &expected, 1e-4);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(durand_kerner(&[]), Err(Error::EmptyPolynomial));
        assert_eq!(
            durand_kerner(&real(&[0.0, 1.0])),
            Err(Error::LeadingCoefficientZero)
        );
        assert!(durand_kerner(&real(&[3.0])).unwrap().is_empty());
        let root = durand_kerner(&real(&[2.0, -3.0])).unwrap();
        assert!((root[0] - Complex64::new(1.5, 0.0)).norm() < 1e-14);
    }

    #[test]
    fn random_polynomials() {
        let mut rng = StdRng::seed_from_u64(42);
        // Rounding noise in the steps sits well above the default tolerance
        // once the roots spread over several units.
        let options = DurandKernerOptions::default().with_tolerance(1e-10);
        for _ in 0..50 {
            let degree: usize = rng.random_range(1..=8);
            // Build from well separated roots so plain iteration converges quickly.
            let mut p = vec![1.0];
            for k in 0..degree {
                let r = k as f64 + rng.random_range(0.1..0.9);
                p.push(0.0);
                for j in (1..p.len()).rev() {
                    p[j] -= r * p[j - 1];
                }
            }
            let roots = durand_kerner_with(&real(&p), &options).unwrap();
            assert_eq!(roots.len(), degree);
            for z in roots {
                let scale = p.iter().fold(0.0, |acc, c| acc * z.norm() + c.abs());
                assert!(eval_real_at_complex(&p, z).norm() <= 1e-10 * scale, "{p:?} {z}");
            }
        }
    }
}

// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging of nearly equal roots.

use num_complex::Complex64;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Default absolute tolerance for [`distinct_roots`].
pub const DISTINCT_ROOT_TOLERANCE: f64 = 1e-14;

/// Collapses near-duplicate roots, keeping the first occurrence of each.
///
/// Two roots are duplicates when their real parts and their imaginary parts
/// each differ by less than `tolerance`. This is a box test, not a Euclidean
/// distance. The output preserves input order and is unchanged by a second
/// application.
///
/// # Examples
///
/// ```
/// use polyroots::{distinct_roots, Complex64, DISTINCT_ROOT_TOLERANCE};
///
/// let roots = [
///     Complex64::new(1.0, 0.0),
///     Complex64::new(2.0, 0.0),
///     Complex64::new(1.0 + 1e-16, 0.0),
/// ];
/// let distinct = distinct_roots(roots, DISTINCT_ROOT_TOLERANCE);
/// assert_eq!(distinct.as_slice(), &roots[..2]);
/// ```
pub fn distinct_roots(
    roots: impl IntoIterator<Item = Complex64>,
    tolerance: f64,
) -> SmallVec<[Complex64; 4]> {
    let mut accepted = SmallVec::<[Complex64; 4]>::new();
    for root in roots {
        let seen = accepted.iter().any(|a: &Complex64| {
            (a.re - root.re).abs() < tolerance && (a.im - root.im).abs() < tolerance
        });
        if !seen {
            accepted.push(root);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn box_not_euclidean() {
        let t = 1e-3;
        let a = Complex64::new(0.0, 0.0);
        // Within tolerance on each axis, further than `t` in Euclidean distance.
        let b = Complex64::new(0.9e-3, 0.9e-3);
        let c = Complex64::new(1.1e-3, 0.0);
        let out = distinct_roots([a, b, c], t);
        assert_eq!(out.as_slice(), [a, c]);
    }

    #[test]
    fn first_occurrence_wins() {
        let a = Complex64::new(1.0, 1.0);
        let b = Complex64::new(1.0 + 5e-15, 1.0 - 5e-15);
        assert_eq!(distinct_roots([b, a], DISTINCT_ROOT_TOLERANCE).as_slice(), [b]);
        assert!(distinct_roots(core::iter::empty(), DISTINCT_ROOT_TOLERANCE).is_empty());
    }

    #[test]
    fn idempotent() {
        arbtest::arbtest(|u| {
            let n = u.int_in_range(0..=12)?;
            let mut roots = Vec::with_capacity(n);
            for _ in 0..n {
                // Small integer lattice so that collisions are common.
                let re = f64::from(u.int_in_range(-3_i8..=3)?) * 1e-14;
                let im = f64::from(u.int_in_range(-3_i8..=3)?) * 1e-14;
                roots.push(Complex64::new(re, im));
            }
            let once = distinct_roots(roots.iter().copied(), DISTINCT_ROOT_TOLERANCE);
            let twice = distinct_roots(once.iter().copied(), DISTINCT_ROOT_TOLERANCE);
            assert_eq!(once, twice);
            Ok(())
        })
        .budget_ms(1_000);
    }
}

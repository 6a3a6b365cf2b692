// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generators and assertions for tests, using `arbitrary`.

use alloc::vec::Vec;

use arbitrary::Unstructured;
use num_complex::Complex64;

/// A float in `[-1, 1]` on a grid fine enough to avoid accidental structure.
fn unit(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    Ok(f64::from(u.int_in_range(-1_000_000_i32..=1_000_000)?) * 1e-6)
}

/// A polynomial coefficient.
///
/// Mixes three populations: values of order one, values spread over twelve
/// decades, and small integers (which exercise the exact discriminant path
/// and produce repeated roots).
pub(crate) fn coefficient(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    Ok(match u.int_in_range(0_u8..=4)? {
        0 | 1 => unit(u)?,
        2 | 3 => unit(u)? * 10.0_f64.powi(u.int_in_range(-6..=6)?),
        _ => f64::from(u.int_in_range(-20_i8..=20)?),
    })
}

/// Coefficients of a polynomial of exactly `degree`, highest degree first.
pub(crate) fn polynomial(
    u: &mut Unstructured<'_>,
    degree: usize,
) -> Result<Vec<f64>, arbitrary::Error> {
    let mut coeffs = Vec::with_capacity(degree + 1);
    for _ in 0..=degree {
        coeffs.push(coefficient(u)?);
    }
    if coeffs[0] == 0.0 {
        coeffs[0] = 1.0;
    }
    Ok(coeffs)
}

/// Asserts that `roots` matches `expected` as a multiset, within `tolerance`
/// on each component.
#[track_caller]
pub(crate) fn assert_roots_near(roots: &[Complex64], expected: &[(f64, f64)], tolerance: f64) {
    assert_eq!(roots.len(), expected.len(), "{roots:?} vs {expected:?}");
    let mut remaining = roots.to_vec();
    for &(re, im) in expected {
        let ix = remaining
            .iter()
            .position(|z| (z.re - re).abs() < tolerance && (z.im - im).abs() < tolerance);
        match ix {
            Some(ix) => {
                remaining.swap_remove(ix);
            }
            None => panic!("no root near {re} + {im}i in {roots:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn polynomial_has_requested_degree() {
        arbtest::arbtest(|u| {
            let degree = u.int_in_range(0..=8)?;
            let p = super::polynomial(u, degree)?;
            assert_eq!(p.len(), degree + 1);
            assert_ne!(p[0], 0.0);
            assert!(p.iter().all(|c| c.is_finite()));
            Ok(())
        })
        .budget_ms(500);
    }
}

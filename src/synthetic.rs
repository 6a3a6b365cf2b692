// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic division by low-degree monic factors.

use alloc::vec::Vec;

use smallvec::SmallVec;

/// A monic divisor of degree one or two.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonicFactor {
    /// The factor `z - s`.
    Linear(f64),
    /// The factor `z^2 + u z + v`.
    Quadratic {
        /// Coefficient of the linear term.
        u: f64,
        /// Constant term.
        v: f64,
    },
}

impl MonicFactor {
    /// The monic quadratic whose roots are `z` and its conjugate.
    pub fn conjugate_pair(re: f64, im: f64) -> Self {
        Self::Quadratic {
            u: -2.0 * re,
            v: re * re + im * im,
        }
    }

    /// Degree of the factor.
    pub fn degree(self) -> usize {
        match self {
            Self::Linear(_) => 1,
            Self::Quadratic { .. } => 2,
        }
    }
}

/// The result of dividing a polynomial by a [`MonicFactor`].
#[derive(Clone, Debug, PartialEq)]
pub struct Division {
    /// Quotient coefficients, decreasing degree.
    pub quotient: Vec<f64>,
    /// Remainder coefficients, decreasing degree, one per degree of the divisor.
    pub remainder: SmallVec<[f64; 2]>,
}

/// Divides `dividend` (decreasing degree) by a monic factor.
///
/// The quotient has `dividend.len() - factor.degree()` coefficients (none if
/// the dividend has lower degree than the factor), and
/// `dividend = quotient * factor + remainder`.
///
/// # Examples
///
/// ```
/// use polyroots::synthetic::{divide, MonicFactor};
///
/// // (z^3 - 6z^2 + 11z - 6) / (z - 1) = z^2 - 5z + 6
/// let d = divide(&[1.0, -6.0, 11.0, -6.0], MonicFactor::Linear(1.0));
/// assert_eq!(d.quotient, [1.0, -5.0, 6.0]);
/// assert_eq!(d.remainder.as_slice(), [0.0]);
/// ```
pub fn divide(dividend: &[f64], factor: MonicFactor) -> Division {
    match factor {
        MonicFactor::Linear(s) => {
            let (quotient, r) = divide_linear(dividend, s);
            Division {
                quotient,
                remainder: SmallVec::from_slice(&[r]),
            }
        }
        MonicFactor::Quadratic { u, v } => {
            let (quotient, r) = divide_quadratic(dividend, u, v);
            Division {
                quotient,
                remainder: SmallVec::from_slice(&r),
            }
        }
    }
}

/// Divides by `z - s`. The remainder is `p(s)`.
pub(crate) fn divide_linear(p: &[f64], s: f64) -> (Vec<f64>, f64) {
    let Some((&last, init)) = p.split_last() else {
        return (Vec::new(), 0.0);
    };
    let mut quotient = Vec::with_capacity(init.len());
    let mut acc = 0.0;
    for &c in init {
        acc = acc * s + c;
        quotient.push(acc);
    }
    (quotient, acc * s + last)
}

/// Divides by `z^2 + u z + v`.
///
/// Returns the quotient and `[r1, r0]` such that `p = q * sigma + r1 z + r0`.
pub(crate) fn divide_quadratic(p: &[f64], u: f64, v: f64) -> (Vec<f64>, [f64; 2]) {
    let (head, tail) = p.split_at(p.len().saturating_sub(2));
    let mut quotient = Vec::with_capacity(head.len());
    // Previous two quotient coefficients.
    let (mut b1, mut b2) = (0.0, 0.0);
    for &c in head {
        let q = c - u * b1 - v * b2;
        quotient.push(q);
        b2 = b1;
        b1 = q;
    }
    let remainder = match *tail {
        [c1, c0] => [c1 - u * b1 - v * b2, c0 - v * b1],
        [c0] => [0.0, c0],
        _ => [0.0, 0.0],
    };
    (quotient, remainder)
}

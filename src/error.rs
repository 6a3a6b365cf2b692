// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// An error produced by one of the iterative root finders.
///
/// The closed-form solvers in [`analytical`](crate::analytical) never fail;
/// degenerate inputs there are answered with fewer roots instead.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The coefficient slice was empty.
    EmptyPolynomial,
    /// The highest-degree coefficient was zero.
    LeadingCoefficientZero,
    /// The working polynomial had a zero constant term during the no-shift stage.
    ZeroConstantTerm,
    /// The iteration cap was reached before the step size fell below tolerance.
    NoConvergence {
        /// Number of iterations performed.
        iterations: usize,
    },
    /// No trial shift produced a converged factor.
    ShiftsExhausted {
        /// Number of shift angles tried for the failing factor.
        attempts: usize,
    },
    /// Newton's method reached a point where the derivative vanishes.
    ZeroDerivative {
        /// The point at which the derivative vanished.
        x: f64,
    },
    /// The bracket passed to bisection was not a finite, ordered interval.
    InvalidBracket {
        /// Lower end of the bracket.
        lower: f64,
        /// Upper end of the bracket.
        upper: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPolynomial => write!(f, "polynomial has no coefficients"),
            Self::LeadingCoefficientZero => write!(f, "leading coefficient is zero"),
            Self::ZeroConstantTerm => {
                write!(f, "constant term is zero, cannot compute no-shift polynomial")
            }
            Self::NoConvergence { iterations } => {
                write!(f, "no convergence after {iterations} iterations")
            }
            Self::ShiftsExhausted { attempts } => {
                write!(f, "no shift converged after {attempts} attempts")
            }
            Self::ZeroDerivative { x } => write!(f, "derivative is zero at {x}"),
            Self::InvalidBracket { lower, upper } => {
                write!(f, "invalid bracket [{lower}, {upper}]")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;
    use alloc::string::ToString;

    #[test]
    fn display() {
        assert_eq!(
            Error::NoConvergence { iterations: 12 }.to_string(),
            "no convergence after 12 iterations"
        );
        assert_eq!(
            Error::InvalidBracket {
                lower: 2.0,
                upper: 1.0
            }
            .to_string(),
            "invalid bracket [2, 1]"
        );
    }
}

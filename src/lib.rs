// Copyright 2025 the Polyroots Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roots of polynomials with real or complex coefficients.
//!
//! The crate has two families of solvers. The closed-form ones handle
//! degrees one to four and never fail: [`linear_root`], [`quadratic_roots`],
//! [`cubic_roots`] and [`quartic_roots`]. They follow Kahan's careful
//! treatment of cancellation, so that, for example, a quadratic with nearly
//! equal roots still gets both of them to full precision.
//!
//! The iterative ones handle any degree:
//!
//! - [`jenkins_traub`] finds all roots of a real polynomial with the
//!   three-stage variable-shift method, extracting real roots and
//!   conjugate pairs one factor at a time.
//! - [`durand_kerner`] refines all roots of a complex polynomial
//!   simultaneously.
//!
//! Coefficients are always given highest degree first, so `[1.0, -3.0, 2.0]`
//! stands for `x^2 - 3x + 2`. Roots are [`Complex64`] values in no particular
//! order.
//!
//! There are also [`bisection`] and [`newton`] for arbitrary scalar
//! functions, and the [`poly`] and [`synthetic`] modules with the
//! evaluation and division routines the solvers are built on.
//!
//! # Examples
//!
//! Closed-form roots:
//! ```
//! use polyroots::{cubic_roots, quadratic_roots, Complex64};
//!
//! // x^2 + 2x + 5
//! let roots = quadratic_roots(1.0, 2.0, 5.0);
//! assert_eq!(roots.as_slice(), [Complex64::new(-1.0, 2.0), Complex64::new(-1.0, -2.0)]);
//!
//! // (x - 1)(x - 2)(x - 3)
//! let roots = cubic_roots(1.0, -6.0, 11.0, -6.0);
//! let mut real: Vec<f64> = roots.iter().map(|z| z.re).collect();
//! real.sort_by(f64::total_cmp);
//! for (x, expected) in real.iter().zip([1.0, 2.0, 3.0]) {
//!     assert!((x - expected).abs() < 1e-14);
//! }
//! ```
//!
//! Any degree:
//! ```
//! use polyroots::poly::eval_real_at_complex;
//! use polyroots::{distinct_roots, jenkins_traub, DISTINCT_ROOT_TOLERANCE};
//!
//! // x^6 - 1
//! let p = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0];
//! let roots = jenkins_traub(&p).unwrap();
//! assert_eq!(roots.len(), 6);
//! for z in &roots {
//!     assert!(eval_real_at_complex(&p, *z).norm() < 1e-12);
//! }
//! assert_eq!(distinct_roots(roots, DISTINCT_ROOT_TOLERANCE).len(), 6);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The crate uses `alloc` regardless.
//!
//! The `serde` feature derives `Serialize` and `Deserialize` for the option
//! structs.
//!
//! # Logging
//!
//! The iterative solvers report their progress through the [`log`] crate:
//! individual steps at `trace`, extracted factors and convergence at
//! `debug`, and an exhausted iteration cap in the scalar finders at `warn`.
//!
//! [`libm`]: https://docs.rs/libm
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    reason = "numeric code with textbook variable names and literal constants"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("polyroots requires either the `std` or `libm` feature");

extern crate alloc;

pub mod analytical;
#[cfg(test)]
mod arbitrary;
pub mod common;
mod distinct;
mod durand_kerner;
mod error;
mod jenkins_traub;
pub mod poly;
mod scalar;
pub mod synthetic;

pub use num_complex::Complex64;

pub use crate::analytical::*;
pub use crate::distinct::*;
pub use crate::durand_kerner::*;
pub use crate::error::Error;
pub use crate::jenkins_traub::*;
pub use crate::scalar::*;

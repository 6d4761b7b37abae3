// This file is part of the clinger project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Correctly rounded decimal to binary conversion
//!
//! This crate implements Algorithm M from *How to Read Floating Point Numbers
//! Accurately* by William D. Clinger, hardwired to convert `f * 10^e` to the
//! nearest `s * 2^k` with a 53-bit significand `s`, ties to even.  All
//! arithmetic is exact on arbitrary-precision integers.
//!
//! ```
//! use clinger::algorithm_m;
//! use num_bigint::BigInt;
//!
//! let x = algorithm_m(&BigInt::from(105), -2).unwrap();
//! assert_eq!(x.to_f64(), Some(1.05));
//! ```
#![no_std]

mod error;
mod float;
mod ratio;

pub use error::{Error, InvalidInput, Result};
pub use float::BinaryFloat;
pub use ratio::{round_ratio, Ratio};

use num_bigint::{BigInt, BigUint, Sign};

/// Exact decimal value `mantissa * 10^exponent`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    pub mantissa: BigUint,
    pub exponent: i32,
}

impl Decimal {
    #[must_use]
    pub const fn new(mantissa: BigUint, exponent: i32) -> Self {
        Self { mantissa, exponent }
    }

    /// Convert to the nearest [`BinaryFloat`] with default [`Options`]
    ///
    /// # Errors
    ///
    /// [`InvalidInput::ZeroMantissa`] if the mantissa is zero
    pub fn to_binary(&self) -> Result<BinaryFloat> {
        Options::default()
            .normalize(&self.mantissa, self.exponent)
            .map(|ratio| round_ratio(&ratio))
    }
}

/// Conversion settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    max_iterations: Option<u64>,
}

impl Options {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_iterations: None,
        }
    }

    /// Cap the number of doublings during normalization
    ///
    /// The default cap is derived from the operands and never reached.
    #[must_use]
    pub const fn with_max_iterations(self, limit: u64) -> Self {
        Self {
            max_iterations: Some(limit),
        }
    }

    #[must_use]
    pub const fn max_iterations(self) -> Option<u64> {
        self.max_iterations
    }

    /// Scale `f * 10^e` to `u / v * 2^k` with `u / v` truncating to a
    /// significand
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::ZeroMantissa`] if `f` is zero
    /// - [`Error::IterationLimit`] if normalization takes too many steps
    pub fn normalize(self, f: &BigUint, e: i32) -> Result<Ratio> {
        ratio::normalize_bounded(f, e, self.max_iterations)
    }

    /// Convert `f * 10^e` to the nearest [`BinaryFloat`], ties to even
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::ZeroMantissa`] if `f` is zero
    /// - [`InvalidInput::NegativeMantissa`] if `f` is negative
    /// - [`Error::IterationLimit`] if normalization takes too many steps
    pub fn convert(self, f: &BigInt, e: i32) -> Result<BinaryFloat> {
        if f.sign() == Sign::Minus {
            return Err(InvalidInput::NegativeMantissa.into());
        }

        self.normalize(f.magnitude(), e).map(|ratio| round_ratio(&ratio))
    }
}

/// Scale `f * 10^e` to `u / v * 2^k` with `u / v` truncating to a significand
///
/// # Errors
///
/// [`InvalidInput::ZeroMantissa`] if `f` is zero
pub fn normalize(f: &BigUint, e: i32) -> Result<Ratio> {
    Options::default().normalize(f, e)
}

/// Convert `f * 10^e` to the nearest [`BinaryFloat`], ties to even
///
/// For instance, 1.05 is `f = 105` and `e = -2`.
///
/// # Errors
///
/// - [`InvalidInput::ZeroMantissa`] if `f` is zero
/// - [`InvalidInput::NegativeMantissa`] if `f` is negative
pub fn algorithm_m(f: &BigInt, e: i32) -> Result<BinaryFloat> {
    Options::default().convert(f, e)
}

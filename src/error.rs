// This file is part of the clinger project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors reported by the conversion

/// Reason a decimal input was rejected before conversion
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// The mantissa is zero, which has no normalized binary representation
    #[error("mantissa is zero")]
    ZeroMantissa,

    /// The mantissa is negative
    ///
    /// Callers separate the sign from the magnitude before converting.
    #[error("mantissa is negative")]
    NegativeMantissa,
}

/// Errors of [`algorithm_m`][crate::algorithm_m] and [`Options::convert`][crate::Options::convert]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Normalization did not converge within the iteration limit
    #[error("internal error: normalization did not converge within {limit} iterations")]
    IterationLimit { limit: u64 },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

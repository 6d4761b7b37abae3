// This file is part of the clinger project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Normalized binary floating-point values with a 53-bit significand

use crate::Decimal;
use core::fmt;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

/// Mask of the explicit fraction bits of [`f64`]
const FRACTION_MASK: u64 = (1 << 52) - 1;

/// Offset from the biased exponent field of [`f64`] to the exponent of an
/// integral significand
const F64_EXPONENT_OFFSET: i64 = 1075;

/// Binary floating-point value `significand * 2^exponent`
///
/// The significand always lies in [2<sup>52</sup>, 2<sup>53</sup>), so every
/// value has exactly one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryFloat {
    significand: BigUint,
    exponent: i64,
}

impl BinaryFloat {
    pub const RADIX: u32 = 2;
    pub const MANTISSA_DIGITS: u32 = 53;

    /// Least exponent whose value is a normal [`f64`]
    pub const F64_MIN_EXPONENT: i64 = 1 - F64_EXPONENT_OFFSET;

    /// Greatest exponent whose value is a finite [`f64`]
    pub const F64_MAX_EXPONENT: i64 = 0x7FE - F64_EXPONENT_OFFSET;

    /// Least significand, 2<sup>52</sup>
    #[must_use]
    pub fn min_significand() -> BigUint {
        BigUint::one() << (Self::MANTISSA_DIGITS - 1)
    }

    /// Exclusive upper bound of significands, 2<sup>53</sup>
    #[must_use]
    pub fn max_significand() -> BigUint {
        BigUint::one() << Self::MANTISSA_DIGITS
    }

    /// Create a value, or [`None`] if `significand` is out of range
    #[must_use]
    pub fn new(significand: BigUint, exponent: i64) -> Option<Self> {
        (Self::min_significand() <= significand && significand < Self::max_significand())
            .then_some(Self { significand, exponent })
    }

    /// Create a value whose significand is known to be in range
    pub(crate) fn from_parts(significand: BigUint, exponent: i64) -> Self {
        debug_assert!(Self::min_significand() <= significand);
        debug_assert!(significand < Self::max_significand());
        Self { significand, exponent }
    }

    #[must_use]
    pub const fn significand(&self) -> &BigUint {
        &self.significand
    }

    #[must_use]
    pub const fn exponent(&self) -> i64 {
        self.exponent
    }

    #[must_use]
    pub fn into_parts(self) -> (BigUint, i64) {
        (self.significand, self.exponent)
    }

    /// The least value greater than `self`
    ///
    /// Incrementing the greatest significand carries into the exponent:
    /// 1.11…1 × 2<sup>k</sup> becomes 1.00…0 × 2<sup>k+1</sup>.
    #[must_use]
    pub fn next_float(&self) -> Self {
        let next = &self.significand + 1u32;

        if next == Self::max_significand() {
            Self {
                significand: Self::min_significand(),
                exponent: self.exponent + 1,
            }
        } else {
            Self {
                significand: next,
                exponent: self.exponent,
            }
        }
    }

    /// Decode the magnitude of a normal [`f64`]
    ///
    /// Zeros, subnormals, infinities, and NaNs yield [`None`].
    #[must_use]
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_normal() {
            return None;
        }

        let bits = x.to_bits();
        let field = (bits >> 52) & 0x7FF;

        #[allow(clippy::cast_possible_wrap)]
        let exponent = field as i64 - F64_EXPONENT_OFFSET;

        Some(Self {
            significand: ((bits & FRACTION_MASK) | 1 << 52).into(),
            exponent,
        })
    }

    /// Encode as a positive [`f64`] if the exponent is in its normal range
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        if !(Self::F64_MIN_EXPONENT..=Self::F64_MAX_EXPONENT).contains(&self.exponent) {
            return None;
        }

        let fraction = self.significand.to_u64()? & FRACTION_MASK;

        #[allow(clippy::cast_sign_loss)]
        let field = (self.exponent + F64_EXPONENT_OFFSET) as u64;

        Some(f64::from_bits(field << 52 | fraction))
    }

    /// Exact decimal value of `self`
    ///
    /// A negative binary exponent turns into a decimal one of the same
    /// magnitude: s × 2<sup>-n</sup> = s × 5<sup>n</sup> × 10<sup>-n</sup>.
    /// Returns [`None`] if the decimal exponent does not fit in [`i32`].
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.exponent >= 0 {
            let shift = usize::try_from(self.exponent).ok()?;
            return Some(Decimal::new(&self.significand << shift, 0));
        }

        let exponent = i32::try_from(self.exponent).ok()?;
        let mantissa = &self.significand * BigUint::from(5u32).pow(exponent.unsigned_abs());
        Some(Decimal::new(mantissa, exponent))
    }
}

impl fmt::Display for BinaryFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * 2^{}", self.significand, self.exponent)
    }
}

/// All 53 bits of the significand followed by `p` and the exponent
impl fmt::Binary for BinaryFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:053b}p{}", self.significand, self.exponent)
    }
}

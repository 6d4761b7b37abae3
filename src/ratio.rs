// This file is part of the clinger project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Exact rational scaling and the final rounding step

use crate::{BinaryFloat, Error, InvalidInput, Result};
use core::cmp::Ordering;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Normalized ratio `u / v * 2^k`
///
/// The truncated quotient `u / v` lies in the significand range of
/// [`BinaryFloat`], so only the remainder is left to round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratio {
    u: BigUint,
    v: BigUint,
    k: i64,
}

impl Ratio {
    /// Create a ratio, or [`None`] if `v` is zero or the truncated quotient is
    /// out of the significand range
    #[must_use]
    pub fn new(u: BigUint, v: BigUint, k: i64) -> Option<Self> {
        if v.is_zero() {
            return None;
        }

        let q = &u / &v;
        (BinaryFloat::min_significand() <= q && q < BinaryFloat::max_significand())
            .then_some(Self { u, v, k })
    }

    #[must_use]
    pub const fn numerator(&self) -> &BigUint {
        &self.u
    }

    #[must_use]
    pub const fn denominator(&self) -> &BigUint {
        &self.v
    }

    #[must_use]
    pub const fn exponent(&self) -> i64 {
        self.k
    }
}

/// Exact `f * 10^e` as a numerator and a denominator
fn decimal_ratio(f: &BigUint, e: i32) -> (BigUint, BigUint) {
    let power = BigUint::from(10u32).pow(e.unsigned_abs());

    if e < 0 {
        (f.clone(), power)
    } else {
        (f * power, BigUint::one())
    }
}

/// Number of doublings that surely brings `u / v` into the significand range
///
/// With `u` of `m` bits and `v` of `n` bits, log<sub>2</sub>(`u / v`) lies in
/// (m - n - 1, m - n + 1) while the target is [52, 53).
fn iteration_bound(u: &BigUint, v: &BigUint) -> u64 {
    let target = u64::from(BinaryFloat::MANTISSA_DIGITS);
    u.bits().abs_diff(v.bits() + target) + 4
}

/// Scale `f * 10^e` by powers of 2 until its truncated value is a significand
///
/// Without `max_iterations`, the loop is capped by [`iteration_bound`], which
/// it never reaches.
pub(crate) fn normalize_bounded(f: &BigUint, e: i32, max_iterations: Option<u64>) -> Result<Ratio> {
    if f.is_zero() {
        return Err(InvalidInput::ZeroMantissa.into());
    }

    let (mut u, mut v) = decimal_ratio(f, e);
    let mut k: i64 = 0;

    let lower = BinaryFloat::min_significand();
    let upper = BinaryFloat::max_significand();
    let limit = max_iterations.unwrap_or_else(|| iteration_bound(&u, &v));

    for iteration in 0..=limit {
        let q = &u / &v;
        log::trace!("step {iteration}: k = {k}, q = {q}");

        if q < lower {
            u *= 2u32;
            k -= 1;
        } else if q >= upper {
            v *= 2u32;
            k += 1;
        } else {
            log::debug!("normalized {f}e{e} in {iteration} steps: k = {k}");
            return Ok(Ratio { u, v, k });
        }
    }

    log::debug!("normalizing {f}e{e} exceeded {limit} steps");
    Err(Error::IterationLimit { limit })
}

/// Round `u / v * 2^k` to the nearest [`BinaryFloat`], ties to even
///
/// The remainder is compared against half the denominator as `2r <=> v`, so
/// no precision is lost.
#[must_use]
pub fn round_ratio(ratio: &Ratio) -> BinaryFloat {
    let (q, r) = ratio.u.div_rem(&ratio.v);
    let z = BinaryFloat::from_parts(q, ratio.k);

    match (r * 2u32).cmp(&ratio.v) {
        Ordering::Less => z,
        Ordering::Greater => z.next_float(),
        Ordering::Equal => {
            log::debug!("exact tie at {z}");

            if z.significand().is_even() {
                z
            } else {
                z.next_float()
            }
        }
    }
}

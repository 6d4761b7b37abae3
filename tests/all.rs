// This file is part of the clinger project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clinger::{algorithm_m, round_ratio, BinaryFloat, Decimal, Options};
use num_bigint::{BigInt, BigUint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SAMPLES: usize = 300;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0x5EED_C11A_6E55)
}

/// Mantissa of up to 38 digits
fn random_mantissa(rng: &mut impl Rng) -> BigUint {
    let high: u64 = rng.random_range(0..1_000_000_000_000_000_000);
    let low: u64 = rng.random_range(1..1_000_000_000_000_000_000);

    if rng.random() {
        BigUint::from(high) * BigUint::from(10u32).pow(19) + low
    } else {
        BigUint::from(low)
    }
}

/// Random positive normal [`f64`]
fn random_f64(rng: &mut impl Rng) -> f64 {
    f64::from_bits(rng.random_range(1 << 52..0x7FF << 52))
}

fn is_in_range(x: &BinaryFloat) -> bool {
    &BinaryFloat::min_significand() <= x.significand()
        && x.significand() < &BinaryFloat::max_significand()
}

/// Exact decimal of the point halfway between `z` and its successor
fn midpoint(z: &BinaryFloat) -> Decimal {
    let odd = z.significand() * 2u32 + 1u32;
    let exponent = z.exponent() - 1;

    if exponent >= 0 {
        Decimal::new(odd << exponent.unsigned_abs(), 0)
    } else {
        let exponent = i32::try_from(exponent).unwrap();
        Decimal::new(odd * BigUint::from(5u32).pow(exponent.unsigned_abs()), exponent)
    }
}

#[test]
fn test_against_std() {
    let mut rng = rng();

    for _ in 0..SAMPLES {
        let f = random_mantissa(&mut rng);
        let e = rng.random_range(-320..=290);
        let x = Decimal::new(f.clone(), e).to_binary().unwrap();
        let expected: f64 = format!("{f}e{e}").parse().unwrap();

        assert!(is_in_range(&x));

        if expected.is_normal() {
            assert_eq!(x.to_f64(), Some(expected), "{f}e{e}");
            assert_eq!(BinaryFloat::from_f64(expected), Some(x));
        }
    }
}

#[test]
fn test_range_beyond_f64() {
    let mut rng = rng();

    for _ in 0..SAMPLES / 10 {
        let f = random_mantissa(&mut rng);
        let e = rng.random_range(-1000..=1000);
        let ratio = Options::new().normalize(&f, e).unwrap();
        let quotient = ratio.numerator() / ratio.denominator();

        assert!(BinaryFloat::min_significand() <= quotient);
        assert!(quotient < BinaryFloat::max_significand());
        assert!(is_in_range(&round_ratio(&ratio)));
    }
}

#[test]
fn test_ties() {
    let mut rng = rng();

    for _ in 0..SAMPLES {
        let z = BinaryFloat::from_f64(random_f64(&mut rng)).unwrap();
        let next = z.next_float();
        let even = if z.significand().bit(0) { next.clone() } else { z.clone() };
        let mid = midpoint(&z);

        assert_eq!(mid.to_binary(), Ok(even));

        let above = Decimal::new(&mid.mantissa * 10u32 + 1u32, mid.exponent - 1);
        let below = Decimal::new(&mid.mantissa * 10u32 - 1u32, mid.exponent - 1);

        assert_eq!(above.to_binary(), Ok(next));
        assert_eq!(below.to_binary(), Ok(z));
    }
}

#[test]
fn test_idempotence() {
    let mut rng = rng();

    for _ in 0..SAMPLES {
        let f = random_mantissa(&mut rng);
        let e = rng.random_range(-340..=340);
        let x = algorithm_m(&BigInt::from(f), e).unwrap();
        let decimal = x.to_decimal().unwrap();

        assert_eq!(decimal.to_binary(), Ok(x));
    }
}

#[test]
fn test_f64_round_trip() {
    let mut rng = rng();

    for _ in 0..SAMPLES {
        let x = random_f64(&mut rng);
        let z = BinaryFloat::from_f64(x).unwrap();
        let (fraction, exponent) = libm::frexp(x);

        assert_eq!(z.to_f64(), Some(x));
        assert_eq!(z.exponent(), i64::from(exponent) - 53);
        assert_eq!(z.significand(), &BigUint::from(libm::ldexp(fraction, 53) as u64));
    }
}

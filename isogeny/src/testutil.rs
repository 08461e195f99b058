//! Shared fixtures for unit tests: a small SIDH-shaped field over the
//! Mersenne prime 2^61 − 1 (which is 3 mod 4, so i² + 1 stays irreducible).

use crypto_bigint::{U64, impl_modulus};

use crate::field::FieldParams;

impl_modulus!(TestMod, U64, "1FFFFFFFFFFFFFFF");

impl FieldParams<{ U64::LIMBS }> for TestMod {
    const INV_EXP: U64 = U64::from_be_hex("1FFFFFFFFFFFFFFD");
    const SQRT_EXP: U64 = U64::from_be_hex("0800000000000000");
    const TWO_INV: U64 = U64::from_be_hex("1000000000000000");
}

pub(crate) type F = crate::field::Fp2<TestMod, { U64::LIMBS }>;
pub(crate) type Pt = crate::point::ProjectivePoint<TestMod, { U64::LIMBS }>;

pub(crate) fn elem(re: u64, im: u64) -> F {
    F {
        re: crate::field::Fp::new(&U64::from_u64(re)),
        im: crate::field::Fp::new(&U64::from_u64(im)),
    }
}

pub(crate) fn pt(a: u64, b: u64, c: u64, d: u64) -> Pt {
    Pt {
        x: elem(a, b),
        z: elem(c, d),
    }
}

/// Projective equality on the Kummer line.
pub(crate) fn proj_eq(a: &Pt, b: &Pt) -> bool {
    &a.x * &b.z == &b.x * &a.z
}

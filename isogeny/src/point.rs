//! Projective x-only (and w-only) point representation.

use crypto_bigint::modular::ConstMontyParams;
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

use crate::field::{FieldParams, Fp2};

/// Projective point (X : Z) on the Kummer line of a curve over GF(p²).
///
/// The affine coordinate is X/Z when Z ≠ 0; any (X : 0) with X ≠ 0 is the
/// point at infinity for the Montgomery x-line, while the Huff w-line places
/// the identity at (0 : Z). No affine y-coordinate is ever stored.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<M: ConstMontyParams<L>, const L: usize> {
    /// Numerator.
    pub x: Fp2<M, L>,
    /// Denominator.
    pub z: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> ProjectivePoint<M, L> {
    /// Lift an affine coordinate to (x : 1).
    pub const fn from_affine(x: Fp2<M, L>) -> Self {
        Self { x, z: Fp2::ONE }
    }
}

impl<M: ConstMontyParams<L>, const L: usize> ConditionallySelectable for ProjectivePoint<M, L> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<M: ConstMontyParams<L>, const L: usize> Zeroize for ProjectivePoint<M, L> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.z.zeroize();
    }
}

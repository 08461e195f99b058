//! Ephemeral key exchange over the Montgomery model.
//!
//! Alice's secret selects a 3^175-isogeny walk, Bob's a 5^119-isogeny walk,
//! both starting from the curve A = 6, C = 1. Public keys are the affine
//! x-coordinates of the pushed basis triple; the shared secret is the
//! j-invariant of the terminal curve.

use isogeny::{Error, WalkParams, kex, rand_core::{TryCryptoRng, TryRngCore}};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    ALICE_GEN, ALICE_MASK, ALICE_SCALAR_BITS, ALICE_STRATEGY, ALICE_WALK_LEN, BOB_GEN, BOB_MASK,
    BOB_SCALAR_BITS, BOB_STRATEGY, BOB_WALK_LEN, MAX_INT_POINTS_ALICE, MAX_INT_POINTS_BOB,
    MONT_P2,
};
use crate::field::{Fp2, LIMBS, P610, decode_pk, encode_pk, encode_ss};
use crate::{ALICE_SECRET_SIZE, BOB_SECRET_SIZE, PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE};

pub(crate) const ALICE_WALK: WalkParams<'static> = WalkParams {
    height: ALICE_WALK_LEN,
    strategy: &ALICE_STRATEGY,
    by_row: true,
    scalar_bits: ALICE_SCALAR_BITS,
};

pub(crate) const BOB_WALK: WalkParams<'static> = WalkParams {
    height: BOB_WALK_LEN,
    strategy: &BOB_STRATEGY,
    by_row: true,
    scalar_bits: BOB_SCALAR_BITS,
};

/// A public key: three concatenated GF(p²) elements encoding
/// x(ϕ(P)), x(ϕ(Q)), x(ϕ(P−Q)).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Parse a public key from its byte encoding.
    ///
    /// No curve-membership or order checks are performed here; rejecting
    /// malformed keys is the KEM wrapper's duty.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(*bytes)
    }

    /// Byte encoding of this public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }
}

/// A shared secret: the j-invariant encoding of the terminal curve.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    /// Byte encoding of this shared secret.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }
}

/// Alice's ephemeral secret scalar.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AliceSecret([u8; ALICE_SECRET_SIZE]);

impl AliceSecret {
    /// Generate a fresh scalar in [0, 2^306) from the given CSPRNG.
    ///
    /// Entropy failure is the one fatal condition of key generation and is
    /// surfaced as [`Error`].
    pub fn random<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut bytes = [0u8; ALICE_SECRET_SIZE];
        rng.try_fill_bytes(&mut bytes).map_err(|_| {
            bytes.zeroize();
            Error
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Build a scalar from bytes, masking the top byte to the subgroup's
    /// bit length.
    pub fn from_bytes(bytes: &[u8; ALICE_SECRET_SIZE]) -> Self {
        let mut sk = *bytes;
        sk[ALICE_SECRET_SIZE - 1] &= ALICE_MASK;
        Self(sk)
    }

    /// Byte encoding of this scalar (already masked).
    pub fn as_bytes(&self) -> &[u8; ALICE_SECRET_SIZE] {
        &self.0
    }

    /// Compute the public key: walk the 3-isogeny tree from the base curve
    /// and push Bob's basis through it.
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [Fp2::ZERO; 3];
        kex::keygen_three::<P610, { LIMBS }, { MAX_INT_POINTS_ALICE }>(
            &ALICE_WALK,
            &ALICE_GEN,
            &BOB_GEN,
            &self.0,
            &mut pk,
        );
        PublicKey(encode_pk(&pk))
    }

    /// Derive the shared secret from Bob's public key.
    pub fn agree(&self, public_key: &PublicKey) -> SharedSecret {
        let pk = decode_pk(&public_key.0);
        let j = kex::agree_three::<P610, { LIMBS }, { MAX_INT_POINTS_ALICE }>(
            &ALICE_WALK,
            &pk,
            &self.0,
        );
        SharedSecret(encode_ss(&j))
    }
}

/// Bob's ephemeral secret scalar.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BobSecret([u8; BOB_SECRET_SIZE]);

impl BobSecret {
    /// Generate a fresh scalar in [0, 2^406) from the given CSPRNG.
    pub fn random<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut bytes = [0u8; BOB_SECRET_SIZE];
        rng.try_fill_bytes(&mut bytes).map_err(|_| {
            bytes.zeroize();
            Error
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Build a scalar from bytes, masking the top byte to the subgroup's
    /// bit length.
    pub fn from_bytes(bytes: &[u8; BOB_SECRET_SIZE]) -> Self {
        let mut sk = *bytes;
        sk[BOB_SECRET_SIZE - 1] &= BOB_MASK;
        Self(sk)
    }

    /// Byte encoding of this scalar (already masked).
    pub fn as_bytes(&self) -> &[u8; BOB_SECRET_SIZE] {
        &self.0
    }

    /// Compute the public key: walk the 5-isogeny tree from the base curve,
    /// carrying the 2-torsion point, and push Alice's basis through it.
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [Fp2::ZERO; 3];
        kex::keygen_five::<P610, { LIMBS }, { MAX_INT_POINTS_BOB }>(
            &BOB_WALK,
            &BOB_GEN,
            &ALICE_GEN,
            &MONT_P2,
            &self.0,
            &mut pk,
        );
        PublicKey(encode_pk(&pk))
    }

    /// Derive the shared secret from Alice's public key.
    pub fn agree(&self, public_key: &PublicKey) -> SharedSecret {
        let pk = decode_pk(&public_key.0);
        let j = kex::agree_five::<P610, { LIMBS }, { MAX_INT_POINTS_BOB }>(&BOB_WALK, &pk, &self.0);
        SharedSecret(encode_ss(&j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HUFF_C;
    use isogeny::montgomery;

    fn six() -> Fp2 {
        let one = Fp2::ONE;
        let two = &one + &one;
        &(&two + &two) + &two
    }

    #[test]
    fn generators_lie_on_the_base_curve() {
        assert_eq!(
            montgomery::get_a(&ALICE_GEN[0], &ALICE_GEN[1], &ALICE_GEN[2]),
            six()
        );
        assert_eq!(
            montgomery::get_a(&BOB_GEN[0], &BOB_GEN[1], &BOB_GEN[2]),
            six()
        );
    }

    #[test]
    fn two_torsion_constant_is_consistent() {
        // MONT_P2 is a root of x^2 + 6x + 1
        let x = Fp2::from_real(MONT_P2);
        let t = &(&x.square() + &(&six() * &x)) + &Fp2::ONE;
        assert!(bool::from(t.is_zero()));
    }

    #[test]
    fn huff_coefficient_is_three_plus_sqrt_eight() {
        let one = Fp2::ONE;
        let two = &one + &one;
        let three = &two + &one;
        let eight = &(&two + &two) + &(&two + &two);
        let c = Fp2::from_real(HUFF_C);
        assert_eq!((&c - &three).square(), eight);
    }

    #[test]
    fn alice_basis_has_three_power_torsion() {
        let one = Fp2::ONE;
        let two = &one + &one;
        let four = &two + &two;
        let eight = &four + &four;
        let mut p = isogeny::ProjectivePoint::from_affine(ALICE_GEN[0]);
        p = montgomery::xtple(&p, &four, &eight, ALICE_WALK_LEN - 1);
        assert!(!bool::from(p.z.is_zero()));
        p = montgomery::xtpl(&p, &four, &eight);
        assert!(bool::from(p.z.is_zero()));
    }

    #[test]
    fn bob_basis_has_five_power_torsion() {
        let one = Fp2::ONE;
        let two = &one + &one;
        let four = &two + &two;
        let eight = &four + &four;
        let mut p = isogeny::ProjectivePoint::from_affine(BOB_GEN[0]);
        p = montgomery::x5pe(&p, &eight, &four, BOB_WALK_LEN - 1);
        assert!(!bool::from(p.z.is_zero()));
        p = montgomery::x5p(&p, &eight, &four);
        assert!(bool::from(p.z.is_zero()));
    }
}

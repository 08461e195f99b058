//! Ephemeral key exchange over the Huff model.
//!
//! Same prime, same walk shapes and the same strategy tables as the
//! Montgomery variant, but with the Huff w-line formula set and the Huff
//! basis generators. The two models do not interoperate on the wire, yet
//! the checked-in bases are isomorphic images of one another, so matching
//! scalars produce matching j-invariants.

use isogeny::{Error, kex, rand_core::{TryCryptoRng, TryRngCore}};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    ALICE_GEN_HUFF, ALICE_MASK, BOB_GEN_HUFF, BOB_MASK, HUFF_C, MAX_INT_POINTS_ALICE,
    MAX_INT_POINTS_BOB,
};
use crate::field::{Fp2, LIMBS, P610, decode_pk, encode_pk, encode_ss};
use crate::sidh::{ALICE_WALK, BOB_WALK};
use crate::{ALICE_SECRET_SIZE, BOB_SECRET_SIZE, PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE};

/// A Huff-model public key: three concatenated GF(p²) elements encoding
/// w(ϕ(P)), w(ϕ(Q)), w(ϕ(P−Q)).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Parse a public key from its byte encoding (no validation).
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(*bytes)
    }

    /// Byte encoding of this public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }
}

/// A shared secret derived through the Huff model.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    /// Byte encoding of this shared secret.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }
}

/// Alice's ephemeral secret scalar (Huff model).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AliceSecret([u8; ALICE_SECRET_SIZE]);

impl AliceSecret {
    /// Generate a fresh scalar from the given CSPRNG.
    pub fn random<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut bytes = [0u8; ALICE_SECRET_SIZE];
        rng.try_fill_bytes(&mut bytes).map_err(|_| {
            bytes.zeroize();
            Error
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Build a scalar from bytes, masking the top byte.
    pub fn from_bytes(bytes: &[u8; ALICE_SECRET_SIZE]) -> Self {
        let mut sk = *bytes;
        sk[ALICE_SECRET_SIZE - 1] &= ALICE_MASK;
        Self(sk)
    }

    /// Byte encoding of this scalar (already masked).
    pub fn as_bytes(&self) -> &[u8; ALICE_SECRET_SIZE] {
        &self.0
    }

    /// Compute the public key over the Huff 3-isogeny walk.
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [Fp2::ZERO; 3];
        kex::keygen_three_huff::<P610, { LIMBS }, { MAX_INT_POINTS_ALICE }>(
            &ALICE_WALK,
            &ALICE_GEN_HUFF,
            &BOB_GEN_HUFF,
            &self.0,
            &mut pk,
        );
        PublicKey(encode_pk(&pk))
    }

    /// Derive the shared secret from Bob's Huff-model public key.
    pub fn agree(&self, public_key: &PublicKey) -> SharedSecret {
        let pk = decode_pk(&public_key.0);
        let j = kex::agree_three_huff::<P610, { LIMBS }, { MAX_INT_POINTS_ALICE }>(
            &ALICE_WALK,
            &pk,
            &self.0,
        );
        SharedSecret(encode_ss(&j))
    }
}

/// Bob's ephemeral secret scalar (Huff model).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BobSecret([u8; BOB_SECRET_SIZE]);

impl BobSecret {
    /// Generate a fresh scalar from the given CSPRNG.
    pub fn random<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, Error> {
        let mut bytes = [0u8; BOB_SECRET_SIZE];
        rng.try_fill_bytes(&mut bytes).map_err(|_| {
            bytes.zeroize();
            Error
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Build a scalar from bytes, masking the top byte.
    pub fn from_bytes(bytes: &[u8; BOB_SECRET_SIZE]) -> Self {
        let mut sk = *bytes;
        sk[BOB_SECRET_SIZE - 1] &= BOB_MASK;
        Self(sk)
    }

    /// Byte encoding of this scalar (already masked).
    pub fn as_bytes(&self) -> &[u8; BOB_SECRET_SIZE] {
        &self.0
    }

    /// Compute the public key over the Huff 5-isogeny walk, carrying the
    /// coefficient pair (C, D) = (c, 1).
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [Fp2::ZERO; 3];
        kex::keygen_five_huff::<P610, { LIMBS }, { MAX_INT_POINTS_BOB }>(
            &BOB_WALK,
            &BOB_GEN_HUFF,
            &ALICE_GEN_HUFF,
            &HUFF_C,
            &self.0,
            &mut pk,
        );
        PublicKey(encode_pk(&pk))
    }

    /// Derive the shared secret from Alice's Huff-model public key. The
    /// starting Huff coefficient is recovered from the key via one square
    /// root.
    pub fn agree(&self, public_key: &PublicKey) -> SharedSecret {
        let pk = decode_pk(&public_key.0);
        let j = kex::agree_five_huff::<P610, { LIMBS }, { MAX_INT_POINTS_BOB }>(
            &BOB_WALK,
            &pk,
            &self.0,
        );
        SharedSecret(encode_ss(&j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isogeny::huff;

    #[test]
    fn huff_basis_matches_its_coefficient() {
        // get_a over a w-triple returns c + 1/c - 2, which is 4 for the
        // base curve c = 3 + sqrt(8)
        let one = Fp2::ONE;
        let two = &one + &one;
        let four = &two + &two;
        assert_eq!(
            huff::get_a(&ALICE_GEN_HUFF[0], &ALICE_GEN_HUFF[1], &ALICE_GEN_HUFF[2]),
            four
        );
        assert_eq!(
            huff::get_a(&BOB_GEN_HUFF[0], &BOB_GEN_HUFF[1], &BOB_GEN_HUFF[2]),
            four
        );
    }

    #[test]
    fn huff_basis_has_the_right_torsion() {
        let one = Fp2::ONE;
        let two = &one + &one;
        let four = &two + &two;
        let eight = &four + &four;
        // Alice: order 3^175 under the ((C-D)^2 : (C+D)^2) = (4 : 8) walk
        let mut p = isogeny::ProjectivePoint::from_affine(ALICE_GEN_HUFF[0]);
        p = huff::xtple(&p, &four, &eight, crate::constants::ALICE_WALK_LEN - 1);
        assert!(!bool::from(p.x.is_zero()));
        p = huff::xtpl(&p, &four, &eight);
        assert!(bool::from(p.x.is_zero()));
        // Bob: order 5^119 under the ((C-D)^2 : 4CD) = (1 : 1) walk
        let mut p = isogeny::ProjectivePoint::from_affine(BOB_GEN_HUFF[0]);
        p = huff::x5pe(&p, &one, &one, crate::constants::BOB_WALK_LEN - 1);
        assert!(!bool::from(p.x.is_zero()));
        p = huff::x5p(&p, &one, &one);
        assert!(bool::from(p.x.is_zero()));
    }
}

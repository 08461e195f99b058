//! Quadratic extension field GF(p²) over a `crypto-bigint` Montgomery-form
//! base field.
//!
//! Elements are pairs `re + im·i` with `i² = −1`, which is a field exactly
//! when p ≡ 3 (mod 4); every supported prime satisfies this. The base field
//! is [`ConstMontyForm`] over a compile-time modulus, so Montgomery
//! conversion, reduction and the canonical tables (p, R², one) live in the
//! multiprecision layer and never appear here.

use core::ops::{Add, Mul, Neg, Sub};

use crypto_bigint::{
    Limb, Uint, Word,
    modular::{ConstMontyForm, ConstMontyParams},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Base field element in Montgomery form.
pub type Fp<M, const LIMBS: usize> = ConstMontyForm<M, LIMBS>;

/// Per-prime constants bundle extending the `crypto-bigint` modulus
/// parameters with the fixed exponent chains the field layer needs.
///
/// All three exponents are public values derived from p alone, so raising to
/// them with a fixed-window ladder is constant time in the field element.
pub trait FieldParams<const LIMBS: usize>: ConstMontyParams<LIMBS> {
    /// p − 2, the Fermat inversion chain.
    const INV_EXP: Uint<LIMBS>;

    /// (p + 1)/4, the square-root chain valid for p ≡ 3 (mod 4).
    const SQRT_EXP: Uint<LIMBS>;

    /// 2⁻¹ mod p = (p + 1)/2, in canonical (non-Montgomery) form.
    const TWO_INV: Uint<LIMBS>;
}

/// Element of GF(p²) = GF(p)[i]/(i² + 1).
#[derive(Clone, Copy, Debug)]
pub struct Fp2<M: ConstMontyParams<L>, const L: usize> {
    /// Real part.
    pub re: Fp<M, L>,
    /// Imaginary part.
    pub im: Fp<M, L>,
}

impl<M: FieldParams<L>, const L: usize> Fp2<M, L> {
    /// Additive identity.
    pub const ZERO: Self = Self {
        re: Fp::ZERO,
        im: Fp::ZERO,
    };

    /// Multiplicative identity.
    pub const ONE: Self = Self {
        re: Fp::ONE,
        im: Fp::ZERO,
    };

    /// Element with the given real part and zero imaginary part.
    pub const fn from_real(re: Fp<M, L>) -> Self {
        Self { re, im: Fp::ZERO }
    }

    /// Squaring: (a + bi)² = (a + b)(a − b) + 2ab·i.
    pub fn square(&self) -> Self {
        let t0 = self.re + self.im;
        let t1 = self.re - self.im;
        let t2 = self.re * self.im;
        Self {
            re: t0 * t1,
            im: t2 + t2,
        }
    }

    /// Halving, i.e. multiplication by 2⁻¹ mod p.
    pub fn half(&self) -> Self {
        let two_inv = Fp::new(&M::TWO_INV);
        Self {
            re: self.re * two_inv,
            im: self.im * two_inv,
        }
    }

    /// Constant-time inversion via one base-field inversion:
    /// (a + bi)⁻¹ = (a − bi)/(a² + b²).
    ///
    /// Zero maps to zero. The walk never inverts zero by construction; a
    /// tampered public key can reach this case, which then yields a
    /// well-formed (if meaningless) result rather than a secret-dependent
    /// branch.
    pub fn invert(&self) -> Self {
        let norm = self.re.square() + self.im.square();
        let inv = norm.pow(&M::INV_EXP);
        Self {
            re: self.re * inv,
            im: -(self.im * inv),
        }
    }

    /// Constant-time square root for p ≡ 3 (mod 4).
    ///
    /// Both square-root candidates of the norm equation are computed and the
    /// valid one is selected without branching. The result is canonicalised
    /// so the least significant bit of its real part is 0; the negated root
    /// is equally valid, and a deterministic choice keeps both parties'
    /// derived constants in agreement.
    ///
    /// The caller must ensure the input is a square; non-squares produce an
    /// unspecified (but well-formed) element.
    pub fn sqrt(&self) -> Self {
        let norm = self.re.square() + self.im.square();
        let s = norm.pow(&M::SQRT_EXP);
        let two_inv = Fp::new(&M::TWO_INV);

        let u1 = (self.re + s) * two_inv;
        let x1 = u1.pow(&M::SQRT_EXP);
        let ok1 = x1.square().ct_eq(&u1);
        let u2 = (self.re - s) * two_inv;
        let x2 = u2.pow(&M::SQRT_EXP);

        let x = Fp::conditional_select(&x2, &x1, ok1);
        let y = self.im * (x + x).pow(&M::INV_EXP);

        let root = Self { re: x, im: y };
        let odd = Choice::from((x.retrieve().as_limbs()[0].0 & 1) as u8);
        Self::conditional_select(&root, &-&root, odd)
    }

    /// Constant-time test for zero.
    pub fn is_zero(&self) -> Choice {
        self.re.ct_eq(&Fp::ZERO) & self.im.ct_eq(&Fp::ZERO)
    }

    /// Serialize to `out`, which holds two equal-length little-endian base
    /// field encodings (real part first). Values are written canonically,
    /// not in Montgomery form.
    pub fn write_bytes(&self, out: &mut [u8]) {
        let fe_len = out.len() / 2;
        let (re, im) = out.split_at_mut(fe_len);
        write_fe(&self.re, re);
        write_fe(&self.im, im);
    }

    /// Deserialize from two concatenated little-endian base field encodings.
    ///
    /// Out-of-range values are reduced mod p; canonicity enforcement
    /// belongs to the KEM wrapper.
    pub fn read_bytes(bytes: &[u8]) -> Self {
        let fe_len = bytes.len() / 2;
        Self {
            re: read_fe(&bytes[..fe_len]),
            im: read_fe(&bytes[fe_len..]),
        }
    }
}

const LIMB_BYTES: usize = (Limb::BITS / 8) as usize;

fn write_fe<M: FieldParams<L>, const L: usize>(x: &Fp<M, L>, out: &mut [u8]) {
    let canonical = x.retrieve();
    let limbs = canonical.as_limbs();
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = (limbs[i / LIMB_BYTES].0 >> (8 * (i % LIMB_BYTES))) as u8;
    }
}

fn read_fe<M: FieldParams<L>, const L: usize>(bytes: &[u8]) -> Fp<M, L> {
    let mut words = [0 as Word; L];
    for (i, byte) in bytes.iter().enumerate() {
        words[i / LIMB_BYTES] |= (*byte as Word) << (8 * (i % LIMB_BYTES));
    }
    Fp::new(&Uint::from_words(words))
}

impl<M: ConstMontyParams<L>, const L: usize> ConditionallySelectable for Fp2<M, L> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            re: Fp::conditional_select(&a.re, &b.re, choice),
            im: Fp::conditional_select(&a.im, &b.im, choice),
        }
    }
}

impl<M: ConstMontyParams<L>, const L: usize> ConstantTimeEq for Fp2<M, L> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.re.ct_eq(&other.re) & self.im.ct_eq(&other.im)
    }
}

impl<M: ConstMontyParams<L>, const L: usize> PartialEq for Fp2<M, L> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<M: ConstMontyParams<L>, const L: usize> Eq for Fp2<M, L> {}

impl<M: ConstMontyParams<L>, const L: usize> Zeroize for Fp2<M, L> {
    fn zeroize(&mut self) {
        self.re = Fp::ZERO;
        self.im = Fp::ZERO;
    }
}

impl<M: ConstMontyParams<L>, const L: usize> Add for &Fp2<M, L> {
    type Output = Fp2<M, L>;

    fn add(self, rhs: Self) -> Fp2<M, L> {
        Fp2 {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl<M: ConstMontyParams<L>, const L: usize> Sub for &Fp2<M, L> {
    type Output = Fp2<M, L>;

    fn sub(self, rhs: Self) -> Fp2<M, L> {
        Fp2 {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl<M: ConstMontyParams<L>, const L: usize> Neg for &Fp2<M, L> {
    type Output = Fp2<M, L>;

    fn neg(self) -> Fp2<M, L> {
        Fp2 {
            re: -self.re,
            im: -self.im,
        }
    }
}

/// Karatsuba multiplication with three base-field multiplications:
/// (a + bi)(c + di) = (ac − bd) + ((a + b)(c + d) − ac − bd)·i.
impl<M: ConstMontyParams<L>, const L: usize> Mul for &Fp2<M, L> {
    type Output = Fp2<M, L>;

    fn mul(self, rhs: Self) -> Fp2<M, L> {
        let t0 = self.re * rhs.re;
        let t1 = self.im * rhs.im;
        let t2 = (self.re + self.im) * (rhs.re + rhs.im);
        Fp2 {
            re: t0 - t1,
            im: t2 - t0 - t1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{F, elem};
    use proptest::prelude::*;

    #[test]
    fn identities() {
        let a = elem(0x1234_5678_9abc_def0, 17);
        assert_eq!(&a * &F::ONE, a);
        assert_eq!(&a + &F::ZERO, a);
        assert_eq!(&a - &a, F::ZERO);
        assert_eq!(a.square(), &a * &a);
    }

    #[test]
    fn i_squared_is_minus_one() {
        let i = elem(0, 1);
        assert_eq!(&i.square() + &F::ONE, F::ZERO);
    }

    #[test]
    fn invert_round_trip() {
        let a = elem(0xdead_beef, 0xfeed_f00d);
        assert_eq!(&a * &a.invert(), F::ONE);
        assert_eq!(F::ZERO.invert(), F::ZERO);
    }

    #[test]
    fn invert_twice_is_identity() {
        let a = elem(99, 0x0bad_cafe);
        assert_eq!(a.invert().invert(), a);
    }

    #[test]
    fn half_doubles_back() {
        let a = elem(0x1111_2222_3333, 7);
        let h = a.half();
        assert_eq!(&h + &h, a);
    }

    #[test]
    fn sqrt_of_squares() {
        for (re, im) in [(3u64, 4u64), (0, 5), (12345, 0), (1, 1)] {
            let a = elem(re, im);
            let sq = a.square();
            let r = a.square().sqrt();
            assert_eq!(r.square(), sq);
            assert_eq!(r.re.retrieve().as_limbs()[0].0 & 1, 0);
        }
    }

    #[test]
    fn bytes_round_trip() {
        let a = elem(0x1fff_ffff_ffff_fffe, 0xabcdef);
        let mut buf = [0u8; 16];
        a.write_bytes(&mut buf);
        assert_eq!(F::read_bytes(&buf), a);
    }

    proptest! {
        #[test]
        fn mul_commutes(a in any::<(u64, u64)>(), b in any::<(u64, u64)>()) {
            let x = elem(a.0, a.1);
            let y = elem(b.0, b.1);
            prop_assert_eq!(&x * &y, &y * &x);
        }

        #[test]
        fn mul_distributes(a in any::<(u64, u64)>(), b in any::<(u64, u64)>(), c in any::<(u64, u64)>()) {
            let x = elem(a.0, a.1);
            let y = elem(b.0, b.1);
            let z = elem(c.0, c.1);
            prop_assert_eq!(&x * &(&y + &z), &(&x * &y) + &(&x * &z));
        }

        #[test]
        fn nonzero_invert(a in any::<(u64, u64)>()) {
            let x = elem(a.0, a.1);
            prop_assume!(!bool::from(x.is_zero()));
            prop_assert_eq!(&x * &x.invert(), F::ONE);
        }
    }
}

//! Generic key-exchange walks.
//!
//! Each function here is one flavor of the key-exchange entry points
//! (public-key generation or shared-secret agreement, per curve model and
//! isogeny degree), written once and monomorphised by the per-prime crates
//! with their constants, strategy tables and stack bounds. Key generation
//! carries the other party's basis through the walk and encodes its affine
//! images; agreement carries nothing and finishes with the terminal curve's
//! j-invariant.

use zeroize::Zeroize;

use crate::field::{FieldParams, Fp, Fp2};
use crate::huff;
use crate::montgomery;
use crate::point::ProjectivePoint;
use crate::strategy::{Schedule, WalkParams};
use crate::walk::{IsogenyMap, traverse};

/// Simultaneously invert the three Z-coordinates and write the affine
/// basis images.
fn encode_basis<M: FieldParams<L>, const L: usize>(
    basis: &[ProjectivePoint<M, L>; 3],
    pk: &mut [Fp2<M, L>; 3],
) {
    let (i0, i1, i2) = montgomery::inv_3_way(&basis[0].z, &basis[1].z, &basis[2].z);
    pk[0] = &basis[0].x * &i0;
    pk[1] = &basis[1].x * &i1;
    pk[2] = &basis[2].x * &i2;
}

fn lift_basis<M: FieldParams<L>, const L: usize>(
    basis: &[Fp2<M, L>; 3],
) -> [ProjectivePoint<M, L>; 3] {
    [
        ProjectivePoint::from_affine(basis[0]),
        ProjectivePoint::from_affine(basis[1]),
        ProjectivePoint::from_affine(basis[2]),
    ]
}

/// Public-key generation over a 3-isogeny walk (Montgomery model), from
/// the base curve A = 6, C = 1.
pub fn keygen_three<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    own_basis: &[Fp2<M, L>; 3],
    other_basis: &[Fp2<M, L>; 3],
    sk: &[u8],
    pk: &mut [Fp2<M, L>; 3],
) {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let six = &four + &two;
    let eight = &four + &four;

    let mut r = montgomery::ladder3pt(
        &own_basis[0],
        &own_basis[1],
        &own_basis[2],
        sk,
        params.scalar_bits,
        &six,
    );
    let mut basis = lift_basis(other_basis);
    let mut walk = montgomery::ThreeWalk {
        a24minus: four,
        a24plus: eight,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut basis);

    let (_, _, phi) = montgomery::ThreeIsogeny::compute(&r);
    for b in &mut basis {
        *b = phi.eval(b);
    }
    r.zeroize();
    encode_basis(&basis, pk);
}

/// Shared-secret agreement over a 3-isogeny walk (Montgomery model). The
/// starting curve is recovered from the peer's public key.
pub fn agree_three<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    pk: &[Fp2<M, L>; 3],
    sk: &[u8],
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;

    let a = montgomery::get_a(&pk[0], &pk[1], &pk[2]);
    let mut r = montgomery::ladder3pt(&pk[0], &pk[1], &pk[2], sk, params.scalar_bits, &a);
    let mut walk = montgomery::ThreeWalk {
        a24minus: &a - &two,
        a24plus: &a + &two,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut []);

    let (a24minus, a24plus, _) = montgomery::ThreeIsogeny::compute(&r);
    r.zeroize();
    let af = &a24plus + &a24minus;
    let af = &af + &af;
    let cf = &a24plus - &a24minus;
    montgomery::j_inv(&af, &cf)
}

/// Public-key generation over a 4-isogeny walk (Montgomery model).
pub fn keygen_four<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    own_basis: &[Fp2<M, L>; 3],
    other_basis: &[Fp2<M, L>; 3],
    sk: &[u8],
    pk: &mut [Fp2<M, L>; 3],
) {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let six = &four + &two;
    let eight = &four + &four;

    let mut r = montgomery::ladder3pt(
        &own_basis[0],
        &own_basis[1],
        &own_basis[2],
        sk,
        params.scalar_bits,
        &six,
    );
    let mut basis = lift_basis(other_basis);
    let mut walk = montgomery::FourWalk {
        a24plus: eight,
        c24: four,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut basis);

    let (_, _, phi) = montgomery::FourIsogeny::compute(&r);
    for b in &mut basis {
        *b = phi.eval(b);
    }
    r.zeroize();
    encode_basis(&basis, pk);
}

/// Shared-secret agreement over a 4-isogeny walk (Montgomery model).
pub fn agree_four<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    pk: &[Fp2<M, L>; 3],
    sk: &[u8],
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let a = montgomery::get_a(&pk[0], &pk[1], &pk[2]);
    let mut r = montgomery::ladder3pt(&pk[0], &pk[1], &pk[2], sk, params.scalar_bits, &a);
    let mut walk = montgomery::FourWalk {
        a24plus: &a + &two,
        c24: four,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut []);

    let (a24plus, c24, _) = montgomery::FourIsogeny::compute(&r);
    r.zeroize();
    let af = &a24plus + &a24plus;
    let af = &af - &c24;
    let af = &af + &af;
    montgomery::j_inv(&af, &c24)
}

/// Public-key generation over a 5-isogeny walk (Montgomery model). The
/// order-2 point of the base curve is carried through the walk so each
/// codomain can be recovered from its image.
pub fn keygen_five<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    own_basis: &[Fp2<M, L>; 3],
    other_basis: &[Fp2<M, L>; 3],
    mont_p2: &Fp<M, L>,
    sk: &[u8],
    pk: &mut [Fp2<M, L>; 3],
) {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let six = &four + &two;
    let eight = &four + &four;

    let mut r = montgomery::ladder3pt(
        &own_basis[0],
        &own_basis[1],
        &own_basis[2],
        sk,
        params.scalar_bits,
        &six,
    );
    let mut basis = lift_basis(other_basis);
    let mut walk = montgomery::FiveWalk {
        a24plus: eight,
        c24: four,
        p2: ProjectivePoint::from_affine(Fp2::from_real(*mont_p2)),
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut basis);

    // the last step needs no codomain, only the basis images
    let k2 = montgomery::xdbl(&r, &walk.a24plus, &walk.c24);
    let phi = montgomery::FiveIsogeny::new(&r, &k2);
    for b in &mut basis {
        *b = phi.eval(b);
    }
    r.zeroize();
    encode_basis(&basis, pk);
}

/// Shared-secret agreement over a 5-isogeny walk (Montgomery model). The
/// carried 2-torsion point is derived from the recovered coefficient.
pub fn agree_five<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    pk: &[Fp2<M, L>; 3],
    sk: &[u8],
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let a = montgomery::get_a(&pk[0], &pk[1], &pk[2]);
    let p2 = montgomery::get_2torsion(&a);
    let mut r = montgomery::ladder3pt(&pk[0], &pk[1], &pk[2], sk, params.scalar_bits, &a);
    let mut walk = montgomery::FiveWalk {
        a24plus: &a + &two,
        c24: four,
        p2,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut []);

    let k2 = montgomery::xdbl(&r, &walk.a24plus, &walk.c24);
    let phi = montgomery::FiveIsogeny::new(&r, &k2);
    let p2 = phi.eval(&walk.p2);
    r.zeroize();
    let (a24plus, c24) = montgomery::five_isog_curve(&p2);
    let af = &a24plus + &a24plus;
    let af = &af - &c24;
    let af = &af + &af;
    montgomery::j_inv(&af, &c24)
}

/// Public-key generation over a Huff-model 3-isogeny walk, from the base
/// curve c = 3 + √8 (for which (C−D)² : (C+D)² = 4 : 8 and
/// A_h = c + 1/c − 2 = 4).
pub fn keygen_three_huff<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    own_basis: &[Fp2<M, L>; 3],
    other_basis: &[Fp2<M, L>; 3],
    sk: &[u8],
    pk: &mut [Fp2<M, L>; 3],
) {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let eight = &four + &four;

    let mut r = huff::ladder3pt(
        &own_basis[0],
        &own_basis[1],
        &own_basis[2],
        sk,
        params.scalar_bits,
        &four,
    );
    let mut basis = lift_basis(other_basis);
    let mut walk = huff::ThreeWalk {
        cmdsq: four,
        cpdsq: eight,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut basis);

    let (_, _, phi) = huff::ThreeIsogeny::compute(&r);
    for b in &mut basis {
        *b = phi.eval(b);
    }
    r.zeroize();
    encode_basis(&basis, pk);
}

/// Shared-secret agreement over a Huff-model 3-isogeny walk.
pub fn agree_three_huff<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    pk: &[Fp2<M, L>; 3],
    sk: &[u8],
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let a_h = huff::get_a(&pk[0], &pk[1], &pk[2]);
    let mut r = huff::ladder3pt(&pk[0], &pk[1], &pk[2], sk, params.scalar_bits, &a_h);
    let mut walk = huff::ThreeWalk {
        cpdsq: &a_h + &four,
        cmdsq: a_h,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut []);

    let (cmdsq, cpdsq, _) = huff::ThreeIsogeny::compute(&r);
    r.zeroize();
    let cd4 = &cpdsq - &cmdsq;
    huff::j_inv(&cpdsq, &cmdsq, &cd4)
}

/// Public-key generation over a Huff-model 4-isogeny walk (for the base
/// curve, (C−D)² : 4CD = 1 : 1).
pub fn keygen_four_huff<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    own_basis: &[Fp2<M, L>; 3],
    other_basis: &[Fp2<M, L>; 3],
    sk: &[u8],
    pk: &mut [Fp2<M, L>; 3],
) {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let mut r = huff::ladder3pt(
        &own_basis[0],
        &own_basis[1],
        &own_basis[2],
        sk,
        params.scalar_bits,
        &four,
    );
    let mut basis = lift_basis(other_basis);
    let mut walk = huff::FourWalk {
        cmdsq: one,
        cd4: one,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut basis);

    let (_, _, phi) = huff::FourIsogeny::compute(&r);
    for b in &mut basis {
        *b = phi.eval(b);
    }
    r.zeroize();
    encode_basis(&basis, pk);
}

/// Shared-secret agreement over a Huff-model 4-isogeny walk.
pub fn agree_four_huff<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    pk: &[Fp2<M, L>; 3],
    sk: &[u8],
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let a_h = huff::get_a(&pk[0], &pk[1], &pk[2]);
    let mut r = huff::ladder3pt(&pk[0], &pk[1], &pk[2], sk, params.scalar_bits, &a_h);
    let mut walk = huff::FourWalk {
        cmdsq: a_h,
        cd4: four,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut []);

    let (cmdsq, cd4, _) = huff::FourIsogeny::compute(&r);
    r.zeroize();
    let cpdsq = &cmdsq + &cd4;
    huff::j_inv(&cpdsq, &cmdsq, &cd4)
}

/// Public-key generation over a Huff-model 5-isogeny walk, carrying
/// (C, D) = (c, 1) from the base curve.
pub fn keygen_five_huff<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    own_basis: &[Fp2<M, L>; 3],
    other_basis: &[Fp2<M, L>; 3],
    huff_c: &Fp<M, L>,
    sk: &[u8],
    pk: &mut [Fp2<M, L>; 3],
) {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let mut r = huff::ladder3pt(
        &own_basis[0],
        &own_basis[1],
        &own_basis[2],
        sk,
        params.scalar_bits,
        &four,
    );
    let mut basis = lift_basis(other_basis);
    let mut walk = huff::FiveWalk {
        c: Fp2::from_real(*huff_c),
        d: one,
        cmdsq: one,
        cd4: one,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut basis);

    let k2 = huff::xdbl(&r, &walk.cmdsq, &walk.cd4);
    let phi = huff::FiveIsogeny::new(&r, &k2);
    for b in &mut basis {
        *b = phi.eval(b);
    }
    r.zeroize();
    encode_basis(&basis, pk);
}

/// Shared-secret agreement over a Huff-model 5-isogeny walk; the Huff
/// coefficient of the starting curve is re-derived from the recovered A_h.
pub fn agree_five_huff<M: FieldParams<L>, const L: usize, const N: usize>(
    params: &WalkParams<'_>,
    pk: &[Fp2<M, L>; 3],
    sk: &[u8],
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;

    let a_h = huff::get_a(&pk[0], &pk[1], &pk[2]);
    let c = huff::get_c(&a_h);
    let mut r = huff::ladder3pt(&pk[0], &pk[1], &pk[2], sk, params.scalar_bits, &a_h);
    let mut walk = huff::FiveWalk {
        c,
        d: one,
        cmdsq: a_h,
        cd4: four,
    };
    let mut schedule = Schedule::new(params);
    traverse::<M, L, _, N>(&mut walk, &mut schedule, params.height, &mut r, &mut []);

    let k2 = huff::xdbl(&r, &walk.cmdsq, &walk.cd4);
    let phi = huff::FiveIsogeny::new(&r, &k2);
    let (_, _, cmdsq, cd4) = phi.codomain(&walk.c, &walk.d);
    r.zeroize();
    let cpdsq = &cmdsq + &cd4;
    huff::j_inv(&cpdsq, &cmdsq, &cd4)
}

//! x-only arithmetic and small-degree isogenies on Montgomery curves
//! By² = x³ + Ax² + x over GF(p²).
//!
//! Curve constants are carried projectively as whichever of (A+2C, A−2C) or
//! (A+2C, 4C) the consuming formula needs; no routine ever normalises to
//! affine A mid-walk. All operations are in-place-safe in the sense that
//! outputs may alias inputs (everything is computed into fresh temporaries
//! and returned by value).

use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

use crate::field::{FieldParams, Fp2};
use crate::point::ProjectivePoint;
use crate::walk::{IsogenyMap, WalkOps};

/// Doubling. Consumes (A24plus, C24) = (A+2C : 4C).
pub fn xdbl<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    a24plus: &Fp2<M, L>,
    c24: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let t0 = (&p.x - &p.z).square();
    let t1 = (&p.x + &p.z).square();
    let z2 = c24 * &t0;
    let x2 = &z2 * &t1;
    let t1 = &t1 - &t0;
    let t0 = a24plus * &t1;
    let z2 = &(&z2 + &t0) * &t1;
    ProjectivePoint { x: x2, z: z2 }
}

/// e-fold doubling.
pub fn xdble<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    a24plus: &Fp2<M, L>,
    c24: &Fp2<M, L>,
    e: usize,
) -> ProjectivePoint<M, L> {
    let mut q = *p;
    for _ in 0..e {
        q = xdbl(&q, a24plus, c24);
    }
    q
}

/// Tripling. Consumes (A24minus, A24plus) = (A−2C : A+2C).
pub fn xtpl<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    a24minus: &Fp2<M, L>,
    a24plus: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let t0 = &p.x - &p.z;
    let t2 = t0.square();
    let t1 = &p.x + &p.z;
    let t3 = t1.square();
    let t4 = &t1 + &t0; // 2X
    let t0 = &t1 - &t0; // 2Z
    let t1 = t4.square();
    let t1 = &t1 - &t3;
    let t1 = &t1 - &t2;
    let t5 = &t3 * a24plus;
    let t3 = &t5 * &t3;
    let t6 = &t2 * a24minus;
    let t2 = &t2 * &t6;
    let t3 = &t3 - &t2; // A24plus(X+Z)^4 - A24minus(X-Z)^4
    let t2 = &t5 - &t6;
    let t1 = &t2 * &t1;
    let t2 = (&t1 - &t3).square();
    let x3 = &t2 * &t4;
    let t1 = (&t1 + &t3).square();
    let z3 = &t1 * &t0;
    ProjectivePoint { x: x3, z: z3 }
}

/// e-fold tripling.
pub fn xtple<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    a24minus: &Fp2<M, L>,
    a24plus: &Fp2<M, L>,
    e: usize,
) -> ProjectivePoint<M, L> {
    let mut q = *p;
    for _ in 0..e {
        q = xtpl(&q, a24minus, a24plus);
    }
    q
}

/// Differential addition: P + Q given the difference P − Q (projective).
/// Needs no curve constants.
pub fn xadd<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    q: &ProjectivePoint<M, L>,
    diff: &ProjectivePoint<M, L>,
) -> ProjectivePoint<M, L> {
    let t0 = &(&p.x + &p.z) * &(&q.x - &q.z);
    let t1 = &(&p.x - &p.z) * &(&q.x + &q.z);
    ProjectivePoint {
        x: &(&t0 + &t1).square() * &diff.z,
        z: &(&t0 - &t1).square() * &diff.x,
    }
}

/// Quintupling via one doubling and two differential additions:
/// [5]P = [3]P + [2]P with difference P.
pub fn x5p<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    a24plus: &Fp2<M, L>,
    c24: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let p2 = xdbl(p, a24plus, c24);
    let p3 = xadd(&p2, p, p);
    xadd(&p3, &p2, p)
}

/// e-fold quintupling.
pub fn x5pe<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    a24plus: &Fp2<M, L>,
    c24: &Fp2<M, L>,
    e: usize,
) -> ProjectivePoint<M, L> {
    let mut q = *p;
    for _ in 0..e {
        q = x5p(&q, a24plus, c24);
    }
    q
}

/// Combined step of the three-point ladder: P ← [2]P and Q ← P + Q, with
/// the difference's x-coordinate given by `xpq` (its Z is folded in by the
/// caller). A24 = (A+2C)/4C.
pub(crate) fn xdbladd<M: FieldParams<L>, const L: usize>(
    p: &mut ProjectivePoint<M, L>,
    q: &mut ProjectivePoint<M, L>,
    xpq: &Fp2<M, L>,
    a24: &Fp2<M, L>,
) {
    let t0 = &p.x + &p.z;
    let t1 = &p.x - &p.z;
    let mut x2 = t0.square();
    let t2 = &q.x - &q.z;
    let mut xqp = &q.x + &q.z;
    let t0 = &t0 * &t2;
    let mut z2 = t1.square();
    let t1 = &t1 * &xqp;
    let t2 = &x2 - &z2;
    x2 = &x2 * &z2;
    xqp = a24 * &t2;
    let zqp = &t0 - &t1;
    z2 = &xqp + &z2;
    xqp = &t0 + &t1;
    z2 = &z2 * &t2;
    let zqp = zqp.square();
    let xqp = xqp.square();
    let zqp = xpq * &zqp;
    p.x = x2;
    p.z = z2;
    q.x = xqp;
    q.z = zqp;
}

/// Bit i of a little-endian scalar, as a [`Choice`].
pub(crate) fn scalar_bit(sk: &[u8], i: usize) -> Choice {
    Choice::from((sk[i >> 3] >> (i & 7)) & 1)
}

/// Ladder main loop shared by both curve models. Starting points are
/// (Q, P − Q, P); returns P + [k]Q for the low `nbits` bits of `sk`.
///
/// Each iteration performs one constant-time conditional swap keyed on the
/// XOR of adjacent scalar bits, one combined double-add, and one projective
/// correction of the difference point; a final swap restores the labeling.
/// No early exit, no branching on bits.
pub(crate) fn ladder_core<M: FieldParams<L>, const L: usize>(
    mut r0: ProjectivePoint<M, L>,
    mut r2: ProjectivePoint<M, L>,
    mut r: ProjectivePoint<M, L>,
    a24: &Fp2<M, L>,
    sk: &[u8],
    nbits: usize,
) -> ProjectivePoint<M, L> {
    let mut prevbit = Choice::from(0u8);
    for i in 0..nbits {
        let bit = scalar_bit(sk, i);
        let swap = bit ^ prevbit;
        prevbit = bit;
        ProjectivePoint::conditional_swap(&mut r, &mut r2, swap);
        xdbladd(&mut r0, &mut r2, &r.x, a24);
        r2.x = &r2.x * &r.z;
    }
    ProjectivePoint::conditional_swap(&mut r, &mut r2, prevbit);
    r0.zeroize();
    r2.zeroize();
    r
}

/// Three-point ladder: given x(P), x(Q), x(P−Q) and the affine coefficient
/// A of the curve, compute x(P + [k]Q).
pub fn ladder3pt<M: FieldParams<L>, const L: usize>(
    xp: &Fp2<M, L>,
    xq: &Fp2<M, L>,
    xpq: &Fp2<M, L>,
    sk: &[u8],
    nbits: usize,
    a: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let a24 = (a + &two).half().half();
    ladder_core(
        ProjectivePoint::from_affine(*xq),
        ProjectivePoint::from_affine(*xpq),
        ProjectivePoint::from_affine(*xp),
        &a24,
        sk,
        nbits,
    )
}

/// Recover the Montgomery coefficient A from the x-coordinates of P, Q and
/// P − Q:
///
/// A = (1 − xP·xQ − xP·xPQ − xQ·xPQ)² / (4·xP·xQ·xPQ) − xP − xQ − xPQ
pub fn get_a<M: FieldParams<L>, const L: usize>(
    xp: &Fp2<M, L>,
    xq: &Fp2<M, L>,
    xpq: &Fp2<M, L>,
) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let t1 = xp + xq;
    let t0 = xp * xq;
    let a = &(xpq * &t1) + &t0;
    let t0 = &t0 * xpq;
    let a = &a - &one;
    let t0 = &t0 + &t0;
    let t1 = &t1 + xpq;
    let t0 = &t0 + &t0;
    let a = &a.square() * &t0.invert();
    &a - &t1
}

/// Non-identity 2-torsion x-coordinate on the curve with coefficient A:
/// a root of x² + Ax + 1. Either root serves; the square root's
/// canonicalisation makes the choice deterministic.
pub fn get_2torsion<M: FieldParams<L>, const L: usize>(a: &Fp2<M, L>) -> ProjectivePoint<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let s = (&a.square() - &four).sqrt();
    ProjectivePoint::from_affine((&s - a).half())
}

/// j-invariant from projective curve constants (A : C):
/// j = 256·(A² − 3C²)³ / (C⁴·(A² − 4C²)).
pub fn j_inv<M: FieldParams<L>, const L: usize>(a: &Fp2<M, L>, c: &Fp2<M, L>) -> Fp2<M, L> {
    let jinv = a.square();
    let t1 = c.square();
    let t0 = &t1 + &t1;
    let t0 = &jinv - &t0;
    let t0 = &t0 - &t1; // A^2 - 3C^2
    let jinv = &t0 - &t1; // A^2 - 4C^2
    let t1 = t1.square();
    let jinv = &jinv * &t1;
    let mut num = &t0.square() * &t0;
    for _ in 0..8 {
        num = &num + &num;
    }
    &num * &jinv.invert()
}

/// Montgomery's trick: invert three elements at the cost of one inversion.
pub fn inv_3_way<M: FieldParams<L>, const L: usize>(
    z1: &Fp2<M, L>,
    z2: &Fp2<M, L>,
    z3: &Fp2<M, L>,
) -> (Fp2<M, L>, Fp2<M, L>, Fp2<M, L>) {
    let t0 = z1 * z2;
    let t1 = (&t0 * z3).invert();
    let t2 = &t1 * z3;
    (&t2 * z2, &t2 * z1, &t1 * &t0)
}

/// A 3-isogeny, holding what is needed to push points through it.
#[derive(Clone, Copy, Debug)]
pub struct ThreeIsogeny<M: FieldParams<L>, const L: usize> {
    k1: Fp2<M, L>,
    k2: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> ThreeIsogeny<M, L> {
    /// From a kernel point of exact order 3, derive the codomain constants
    /// (A24minus′, A24plus′) and the evaluator.
    pub fn compute(kernel: &ProjectivePoint<M, L>) -> (Fp2<M, L>, Fp2<M, L>, Self) {
        let k1 = &kernel.x - &kernel.z;
        let t0 = k1.square();
        let k2 = &kernel.x + &kernel.z;
        let t1 = k2.square();
        let t3 = (&kernel.x + &kernel.x).square();
        let t2 = &t3 - &t0;
        let t3 = &t3 - &t1;
        let t4 = &t0 + &t3;
        let t4 = &t4 + &t4;
        let t4 = &t1 + &t4;
        let a24minus = &t2 * &t4;
        let t4 = &t1 + &t2;
        let t4 = &t4 + &t4;
        let t4 = &t0 + &t4;
        let a24plus = &t3 * &t4;
        (a24minus, a24plus, Self { k1, k2 })
    }
}

impl<M: FieldParams<L>, const L: usize> IsogenyMap<M, L> for ThreeIsogeny<M, L> {
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L> {
        let t0 = &(&p.x + &p.z) * &self.k1;
        let t1 = &(&p.x - &p.z) * &self.k2;
        let t2 = &t0 + &t1;
        let t0 = &t1 - &t0;
        ProjectivePoint {
            x: &p.x * &t2.square(),
            z: &p.z * &t0.square(),
        }
    }
}

/// A 4-isogeny.
#[derive(Clone, Copy, Debug)]
pub struct FourIsogeny<M: FieldParams<L>, const L: usize> {
    k1: Fp2<M, L>,
    k2: Fp2<M, L>,
    k3: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> FourIsogeny<M, L> {
    /// From a kernel point of exact order 4, derive (A24plus′, C24′) and
    /// the evaluator.
    pub fn compute(kernel: &ProjectivePoint<M, L>) -> (Fp2<M, L>, Fp2<M, L>, Self) {
        let k2 = &kernel.x - &kernel.z;
        let k3 = &kernel.x + &kernel.z;
        let k1 = kernel.z.square();
        let k1 = &k1 + &k1;
        let c24 = k1.square();
        let k1 = &k1 + &k1;
        let a24plus = kernel.x.square();
        let a24plus = &a24plus + &a24plus;
        let a24plus = a24plus.square();
        (a24plus, c24, Self { k1, k2, k3 })
    }
}

impl<M: FieldParams<L>, const L: usize> IsogenyMap<M, L> for FourIsogeny<M, L> {
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L> {
        let t0 = &p.x + &p.z;
        let t1 = &p.x - &p.z;
        let xq = &t0 * &self.k2;
        let zq = &t1 * &self.k3;
        let t0 = &t0 * &t1;
        let t0 = &t0 * &self.k1;
        let t1 = &xq + &zq;
        let zq = &xq - &zq;
        let t1 = t1.square();
        let zq = zq.square();
        let xq = &t0 + &t1;
        let t0 = &zq - &t0;
        ProjectivePoint {
            x: &xq * &t1,
            z: &zq * &t0,
        }
    }
}

/// A 5-isogeny, evaluated directly from its kernel points K and [2]K with
/// the two-point product form
///
/// X′ = X·∏ᵢ(X·Xᵢ − Z·Zᵢ)², Z′ = Z·∏ᵢ(X·Zᵢ − Z·Xᵢ)².
///
/// The codomain is not derived from the kernel; the caller recovers it from
/// the image of the carried 2-torsion point via [`five_isog_curve`].
#[derive(Clone, Copy, Debug)]
pub struct FiveIsogeny<M: FieldParams<L>, const L: usize> {
    s1: Fp2<M, L>,
    d1: Fp2<M, L>,
    s2: Fp2<M, L>,
    d2: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> FiveIsogeny<M, L> {
    /// Build the evaluator from the kernel generator and its double.
    pub fn new(k: &ProjectivePoint<M, L>, k2: &ProjectivePoint<M, L>) -> Self {
        Self {
            s1: &k.x + &k.z,
            d1: &k.x - &k.z,
            s2: &k2.x + &k2.z,
            d2: &k2.x - &k2.z,
        }
    }
}

impl<M: FieldParams<L>, const L: usize> IsogenyMap<M, L> for FiveIsogeny<M, L> {
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L> {
        let s = &p.x + &p.z;
        let d = &p.x - &p.z;
        let a1 = &s * &self.d1;
        let b1 = &d * &self.s1;
        let a2 = &s * &self.d2;
        let b2 = &d * &self.s2;
        let fx = &(&a1 + &b1) * &(&a2 + &b2);
        let fz = &(&b1 - &a1) * &(&b2 - &a2);
        ProjectivePoint {
            x: &p.x * &fx.square(),
            z: &p.z * &fz.square(),
        }
    }
}

/// Recover (A24plus′, C24′) of a 5-isogeny codomain from the image of the
/// carried 2-torsion point: its x-coordinate is a root of x² + A′x + 1, so
/// (A′+2C′ : 4C′) = (−(X−Z)² : 4XZ).
pub fn five_isog_curve<M: FieldParams<L>, const L: usize>(
    p2: &ProjectivePoint<M, L>,
) -> (Fp2<M, L>, Fp2<M, L>) {
    let a24plus = -&(&p2.x - &p2.z).square();
    let t = &p2.x * &p2.z;
    let t = &t + &t;
    let c24 = &t + &t;
    (a24plus, c24)
}

/// Walk flavor for 3-isogeny trees, tracking (A24minus : A24plus).
#[derive(Clone, Copy, Debug)]
pub struct ThreeWalk<M: FieldParams<L>, const L: usize> {
    /// A − 2C, projectively.
    pub a24minus: Fp2<M, L>,
    /// A + 2C, projectively.
    pub a24plus: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> WalkOps<M, L> for ThreeWalk<M, L> {
    type Map = ThreeIsogeny<M, L>;

    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L> {
        xtple(r, &self.a24minus, &self.a24plus, m)
    }

    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map {
        let (a24minus, a24plus, map) = ThreeIsogeny::compute(kernel);
        self.a24minus = a24minus;
        self.a24plus = a24plus;
        map
    }
}

/// Walk flavor for 4-isogeny trees, tracking (A24plus : C24). Each tree
/// level is worth two doublings.
#[derive(Clone, Copy, Debug)]
pub struct FourWalk<M: FieldParams<L>, const L: usize> {
    /// A + 2C, projectively.
    pub a24plus: Fp2<M, L>,
    /// 4C, projectively.
    pub c24: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> WalkOps<M, L> for FourWalk<M, L> {
    type Map = FourIsogeny<M, L>;

    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L> {
        xdble(r, &self.a24plus, &self.c24, 2 * m)
    }

    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map {
        let (a24plus, c24, map) = FourIsogeny::compute(kernel);
        self.a24plus = a24plus;
        self.c24 = c24;
        map
    }
}

/// Walk flavor for 5-isogeny trees, tracking (A24plus : C24) and carrying
/// the 2-torsion point whose images yield each codomain.
#[derive(Clone, Copy, Debug)]
pub struct FiveWalk<M: FieldParams<L>, const L: usize> {
    /// A + 2C, projectively.
    pub a24plus: Fp2<M, L>,
    /// 4C, projectively.
    pub c24: Fp2<M, L>,
    /// The 2-torsion point, pushed through every step.
    pub p2: ProjectivePoint<M, L>,
}

impl<M: FieldParams<L>, const L: usize> WalkOps<M, L> for FiveWalk<M, L> {
    type Map = FiveIsogeny<M, L>;

    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L> {
        x5pe(r, &self.a24plus, &self.c24, m)
    }

    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map {
        let k2 = xdbl(kernel, &self.a24plus, &self.c24);
        let map = FiveIsogeny::new(kernel, &k2);
        self.p2 = map.eval(&self.p2);
        let (a24plus, c24) = five_isog_curve(&self.p2);
        self.a24plus = a24plus;
        self.c24 = c24;
        map
    }
}

//! w-only arithmetic and small-degree isogenies on Huff curves
//! Cx(y² − 1) = Dy(x² − 1) over GF(p²), in the coordinate w = xy.
//!
//! On the Montgomery curve with (A : C_m) = (C² + D² : CD) the w-line is the
//! x-line composed with translation by the 2-torsion point (0, 0), so the
//! formula set below is the Montgomery one with the roles of the two
//! projective coordinates exchanged and the constants carried as (C−D)²,
//! (C+D)² and 4CD (the images of A−2C, A+2C and 4C). The identity sits at
//! w = 0 rather than at infinity.
//!
//! The payoff of the model is in the degree-5 step: both 2-torsion
//! w-coordinates are (−D : C) and (−C : D), known from the tracked C and D,
//! so the codomain is recovered by one extra isogeny evaluation instead of
//! a square root or a carried point.

use zeroize::Zeroize;

use crate::field::{FieldParams, Fp2};
use crate::montgomery;
use crate::point::ProjectivePoint;
use crate::walk::{IsogenyMap, WalkOps};

/// Doubling. Consumes ((C−D)² : 4CD).
pub fn xdbl<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    cmdsq: &Fp2<M, L>,
    cd4: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let t0 = (&p.x + &p.z).square();
    let t1 = (&p.x - &p.z).square();
    let t2 = &t0 - &t1; // 4WZ
    let t3 = cd4 * &t0;
    let w2 = &t2 * &(&t3 + &(cmdsq * &t2));
    let z2 = &t3 * &t1;
    ProjectivePoint { x: w2, z: z2 }
}

/// e-fold doubling.
pub fn xdble<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    cmdsq: &Fp2<M, L>,
    cd4: &Fp2<M, L>,
    e: usize,
) -> ProjectivePoint<M, L> {
    let mut q = *p;
    for _ in 0..e {
        q = xdbl(&q, cmdsq, cd4);
    }
    q
}

/// Tripling. Consumes ((C−D)² : (C+D)²).
pub fn xtpl<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    cmdsq: &Fp2<M, L>,
    cpdsq: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let t0 = &p.z - &p.x;
    let t2 = t0.square();
    let t1 = &p.z + &p.x;
    let t3 = t1.square();
    let t4 = &t1 + &t0; // 2Z
    let t0 = &t1 - &t0; // 2W
    let t1 = t4.square();
    let t1 = &t1 - &t3;
    let t1 = &t1 - &t2;
    let t5 = &t3 * cpdsq;
    let t3 = &t5 * &t3;
    let t6 = &t2 * cmdsq;
    let t2 = &t2 * &t6;
    let t3 = &t3 - &t2;
    let t2 = &t5 - &t6;
    let t1 = &t2 * &t1;
    let t2 = (&t1 + &t3).square();
    let w3 = &t2 * &t0;
    let t1 = (&t1 - &t3).square();
    let z3 = &t1 * &t4;
    ProjectivePoint { x: w3, z: z3 }
}

/// e-fold tripling.
pub fn xtple<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    cmdsq: &Fp2<M, L>,
    cpdsq: &Fp2<M, L>,
    e: usize,
) -> ProjectivePoint<M, L> {
    let mut q = *p;
    for _ in 0..e {
        q = xtpl(&q, cmdsq, cpdsq);
    }
    q
}

/// Differential addition on the w-line.
pub fn xadd<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    q: &ProjectivePoint<M, L>,
    diff: &ProjectivePoint<M, L>,
) -> ProjectivePoint<M, L> {
    let t0 = &(&p.z + &p.x) * &(&q.z - &q.x);
    let t1 = &(&p.z - &p.x) * &(&q.z + &q.x);
    ProjectivePoint {
        x: &(&t0 - &t1).square() * &diff.z,
        z: &(&t0 + &t1).square() * &diff.x,
    }
}

/// Quintupling via one doubling and two differential additions.
pub fn x5p<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    cmdsq: &Fp2<M, L>,
    cd4: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let p2 = xdbl(p, cmdsq, cd4);
    let p3 = xadd(&p2, p, p);
    xadd(&p3, &p2, p)
}

/// e-fold quintupling.
pub fn x5pe<M: FieldParams<L>, const L: usize>(
    p: &ProjectivePoint<M, L>,
    cmdsq: &Fp2<M, L>,
    cd4: &Fp2<M, L>,
    e: usize,
) -> ProjectivePoint<M, L> {
    let mut q = *p;
    for _ in 0..e {
        q = x5p(&q, cmdsq, cd4);
    }
    q
}

/// Three-point ladder on the w-line: given w(P), w(Q), w(P−Q) and the
/// scaled coefficient A_h = (C−D)²/CD, compute w(P + [k]Q).
pub fn ladder3pt<M: FieldParams<L>, const L: usize>(
    wp: &Fp2<M, L>,
    wq: &Fp2<M, L>,
    wpq: &Fp2<M, L>,
    sk: &[u8],
    nbits: usize,
    a_h: &Fp2<M, L>,
) -> ProjectivePoint<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let a24 = (a_h + &four).half().half();
    let r0 = ProjectivePoint { x: one, z: *wq };
    let r2 = ProjectivePoint { x: one, z: *wpq };
    let r = ProjectivePoint { x: one, z: *wp };
    let mut out = montgomery::ladder_core(r0, r2, r, &a24, sk, nbits);
    let res = ProjectivePoint { x: out.z, z: out.x };
    out.zeroize();
    res
}

/// Recover A_h = (C−D)²/CD = c + 1/c − 2 from a w-coordinate triple
/// (w(P), w(Q), w(P−Q)).
pub fn get_a<M: FieldParams<L>, const L: usize>(
    wp: &Fp2<M, L>,
    wq: &Fp2<M, L>,
    wpq: &Fp2<M, L>,
) -> Fp2<M, L> {
    let s1 = &(wp + wq) + wpq;
    let t0 = wp * wq;
    let s2 = &(&t0 + &(wp * wpq)) + &(wq * wpq);
    let t = &t0 * wpq;
    let t2 = &t + &t;
    let u = &s2 + &t2;
    let u = &u + &u;
    let u = &u + &u; // 4(s2 + 2t)
    let num = &(&t - &s1).square() - &u;
    let t4 = &t2 + &t2;
    &num * &t4.invert()
}

/// Recover the Huff coefficient c from A_h = c + 1/c − 2 by solving
/// c² − (A_h + 2)c + 1 = 0. Either root works: c and 1/c label the same
/// curve and the walk's constant recovery is symmetric under the exchange.
pub fn get_c<M: FieldParams<L>, const L: usize>(a_h: &Fp2<M, L>) -> Fp2<M, L> {
    let one = Fp2::ONE;
    let two = &one + &one;
    let four = &two + &two;
    let b = a_h + &two;
    let s = (&b.square() - &four).sqrt();
    (&b + &s).half()
}

/// j-invariant from ((C+D)², (C−D)², 4CD): the isomorphic Montgomery curve
/// has (A : C_m) = (2((C+D)² + (C−D)²) : 4CD) projectively.
pub fn j_inv<M: FieldParams<L>, const L: usize>(
    cpdsq: &Fp2<M, L>,
    cmdsq: &Fp2<M, L>,
    cd4: &Fp2<M, L>,
) -> Fp2<M, L> {
    let a = cpdsq + cmdsq;
    let a = &a + &a;
    montgomery::j_inv(&a, cd4)
}

/// A 3-isogeny of Huff curves.
#[derive(Clone, Copy, Debug)]
pub struct ThreeIsogeny<M: FieldParams<L>, const L: usize> {
    k1: Fp2<M, L>,
    k2: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> ThreeIsogeny<M, L> {
    /// From a kernel point of exact order 3, derive the codomain constants
    /// ((C′−D′)², (C′+D′)²) and the evaluator.
    pub fn compute(kernel: &ProjectivePoint<M, L>) -> (Fp2<M, L>, Fp2<M, L>, Self) {
        let k1 = &kernel.z - &kernel.x;
        let t0 = k1.square();
        let k2 = &kernel.z + &kernel.x;
        let t1 = k2.square();
        let t3 = (&kernel.z + &kernel.z).square();
        let t2 = &t3 - &t0;
        let t3 = &t3 - &t1;
        let t4 = &t0 + &t3;
        let t4 = &t4 + &t4;
        let t4 = &t1 + &t4;
        let cmdsq = &t2 * &t4;
        let t4 = &t1 + &t2;
        let t4 = &t4 + &t4;
        let t4 = &t0 + &t4;
        let cpdsq = &t3 * &t4;
        (cmdsq, cpdsq, Self { k1, k2 })
    }
}

impl<M: FieldParams<L>, const L: usize> IsogenyMap<M, L> for ThreeIsogeny<M, L> {
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L> {
        let t0 = &(&p.z + &p.x) * &self.k1;
        let t1 = &(&p.z - &p.x) * &self.k2;
        let t2 = &t0 + &t1;
        let t0 = &t1 - &t0;
        ProjectivePoint {
            x: &p.x * &t0.square(),
            z: &p.z * &t2.square(),
        }
    }
}

/// A 4-isogeny of Huff curves.
#[derive(Clone, Copy, Debug)]
pub struct FourIsogeny<M: FieldParams<L>, const L: usize> {
    k1: Fp2<M, L>,
    k2: Fp2<M, L>,
    k3: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> FourIsogeny<M, L> {
    /// From a kernel point of exact order 4, derive ((C′−D′)², 4C′D′) and
    /// the evaluator.
    pub fn compute(kernel: &ProjectivePoint<M, L>) -> (Fp2<M, L>, Fp2<M, L>, Self) {
        let k2 = &kernel.z - &kernel.x;
        let k3 = &kernel.z + &kernel.x;
        let k1 = kernel.x.square();
        let k1 = &k1 + &k1;
        let cd4 = k1.square();
        let k1 = &k1 + &k1;
        let t0 = kernel.z.square();
        let t0 = &t0 + &t0;
        let t0 = t0.square();
        let cmdsq = &t0 - &cd4;
        (cmdsq, cd4, Self { k1, k2, k3 })
    }
}

impl<M: FieldParams<L>, const L: usize> IsogenyMap<M, L> for FourIsogeny<M, L> {
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L> {
        let t0 = &p.z + &p.x;
        let t1 = &p.z - &p.x;
        let wq = &t0 * &self.k2;
        let zq = &t1 * &self.k3;
        let t0 = &t0 * &t1;
        let t0 = &t0 * &self.k1;
        let t1 = &wq + &zq;
        let zq = &wq - &zq;
        let t1 = t1.square();
        let zq = zq.square();
        let wq = &t0 + &t1;
        let t0 = &zq - &t0;
        ProjectivePoint {
            x: &zq * &t0,
            z: &wq * &t1,
        }
    }
}

/// A 5-isogeny of Huff curves. The coefficient bundle has four entries
/// (the sums and differences of the two kernel points), one more than the
/// degree-3 and degree-4 bundles.
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

    /// Derive the codomain coefficients by pushing the known 2-torsion
    /// point (−D : C) through the isogeny; its image is (−D′ : C′).
    /// Returns (C′, D′, (C′−D′)², 4C′D′).
    pub fn codomain(
        &self,
        c: &Fp2<M, L>,
        d: &Fp2<M, L>,
    ) -> (Fp2<M, L>, Fp2<M, L>, Fp2<M, L>, Fp2<M, L>) {
        let torsion = ProjectivePoint { x: -d, z: *c };
        let img = self.eval(&torsion);
        let c_new = img.z;
        let d_new = -&img.x;
        let cmdsq = (&c_new - &d_new).square();
        let t = &c_new * &d_new;
        let t = &t + &t;
        let cd4 = &t + &t;
        (c_new, d_new, cmdsq, cd4)
    }
}

impl<M: FieldParams<L>, const L: usize> IsogenyMap<M, L> for FiveIsogeny<M, L> {
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L> {
        let s = &p.x + &p.z;
        let d = &p.x - &p.z;
        let u1 = &s * &self.d1;
        let v1 = &d * &self.s1;
        let u2 = &s * &self.d2;
        let v2 = &d * &self.s2;
        let fw = &(&u1 - &v1) * &(&u2 - &v2);
        let fz = &(&u1 + &v1) * &(&u2 + &v2);
        ProjectivePoint {
            x: &p.x * &fw.square(),
            z: &p.z * &fz.square(),
        }
    }
}

/// Walk flavor for Huff 3-isogeny trees, tracking ((C−D)² : (C+D)²).
#[derive(Clone, Copy, Debug)]
pub struct ThreeWalk<M: FieldParams<L>, const L: usize> {
    /// (C−D)², projectively.
    pub cmdsq: Fp2<M, L>,
    /// (C+D)², projectively.
    pub cpdsq: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> WalkOps<M, L> for ThreeWalk<M, L> {
    type Map = ThreeIsogeny<M, L>;

    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L> {
        xtple(r, &self.cmdsq, &self.cpdsq, m)
    }

    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map {
        let (cmdsq, cpdsq, map) = ThreeIsogeny::compute(kernel);
        self.cmdsq = cmdsq;
        self.cpdsq = cpdsq;
        map
    }
}

/// Walk flavor for Huff 4-isogeny trees, tracking ((C−D)² : 4CD).
#[derive(Clone, Copy, Debug)]
pub struct FourWalk<M: FieldParams<L>, const L: usize> {
    /// (C−D)², projectively.
    pub cmdsq: Fp2<M, L>,
    /// 4CD, projectively.
    pub cd4: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> WalkOps<M, L> for FourWalk<M, L> {
    type Map = FourIsogeny<M, L>;

    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L> {
        xdble(r, &self.cmdsq, &self.cd4, 2 * m)
    }

    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map {
        let (cmdsq, cd4, map) = FourIsogeny::compute(kernel);
        self.cmdsq = cmdsq;
        self.cd4 = cd4;
        map
    }
}

/// Walk flavor for Huff 5-isogeny trees, tracking C and D individually so
/// each codomain can be recovered from the 2-torsion without a square root.
#[derive(Clone, Copy, Debug)]
pub struct FiveWalk<M: FieldParams<L>, const L: usize> {
    /// Huff coefficient C.
    pub c: Fp2<M, L>,
    /// Huff coefficient D.
    pub d: Fp2<M, L>,
    /// (C−D)², projectively.
    pub cmdsq: Fp2<M, L>,
    /// 4CD, projectively.
    pub cd4: Fp2<M, L>,
}

impl<M: FieldParams<L>, const L: usize> WalkOps<M, L> for FiveWalk<M, L> {
    type Map = FiveIsogeny<M, L>;

    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L> {
        x5pe(r, &self.cmdsq, &self.cd4, m)
    }

    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map {
        let k2 = xdbl(kernel, &self.cmdsq, &self.cd4);
        let map = FiveIsogeny::new(kernel, &k2);
        let (c, d, cmdsq, cd4) = map.codomain(&self.c, &self.d);
        self.c = c;
        self.d = d;
        self.cmdsq = cmdsq;
        self.cd4 = cd4;
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Pt, elem, proj_eq, pt};

    fn swap(p: &Pt) -> Pt {
        Pt { x: p.z, z: p.x }
    }

    #[test]
    fn doubling_conjugates_montgomery_doubling() {
        let p = pt(9, 2, 5, 7);
        let cmdsq = elem(12, 3);
        let cd4 = elem(8, 1);
        // on the isomorphic Montgomery curve A+2C = (C-D)^2 + 4CD
        let a24plus = &cmdsq + &cd4;
        let lhs = xdbl(&p, &cmdsq, &cd4);
        let rhs = swap(&montgomery::xdbl(&swap(&p), &a24plus, &cd4));
        assert!(proj_eq(&lhs, &rhs));
    }

    #[test]
    fn tripling_conjugates_montgomery_tripling() {
        let p = pt(4, 11, 6, 3);
        let cmdsq = elem(21, 5);
        let cpdsq = elem(14, 9);
        let lhs = xtpl(&p, &cmdsq, &cpdsq);
        let rhs = swap(&montgomery::xtpl(&swap(&p), &cmdsq, &cpdsq));
        assert!(proj_eq(&lhs, &rhs));
    }

    #[test]
    fn differential_addition_conjugates() {
        let (p, q, d) = (pt(3, 1, 2, 9), pt(7, 7, 4, 2), pt(5, 6, 8, 3));
        let lhs = xadd(&p, &q, &d);
        let rhs = swap(&montgomery::xadd(&swap(&p), &swap(&q), &swap(&d)));
        assert!(proj_eq(&lhs, &rhs));
    }

    #[test]
    fn three_isogeny_conjugates() {
        let k = pt(10, 3, 7, 8);
        let q = pt(2, 13, 5, 1);
        let (cm, cp, phi) = ThreeIsogeny::compute(&k);
        let (rm, rp, phi_m) = montgomery::ThreeIsogeny::compute(&swap(&k));
        // constants agree projectively as a pair
        assert_eq!(&cm * &rp, &rm * &cp);
        let lhs = phi.eval(&q);
        let rhs = swap(&phi_m.eval(&swap(&q)));
        assert!(proj_eq(&lhs, &rhs));
    }

    #[test]
    fn four_isogeny_conjugates() {
        let k = pt(6, 9, 11, 4);
        let q = pt(8, 2, 3, 10);
        let (cm, cd4, phi) = FourIsogeny::compute(&k);
        let (ra24p, rc24, phi_m) = montgomery::FourIsogeny::compute(&swap(&k));
        // (C'-D')^2 corresponds to A'-2C' = A24plus' - C24'
        assert_eq!(&cm * &rc24, &(&ra24p - &rc24) * &cd4);
        let lhs = phi.eval(&q);
        let rhs = swap(&phi_m.eval(&swap(&q)));
        assert!(proj_eq(&lhs, &rhs));
    }

    #[test]
    fn five_isogeny_kills_its_kernel() {
        let cmdsq = elem(5, 2);
        let cd4 = elem(9, 4);
        let k = pt(3, 8, 1, 0);
        let k2 = xdbl(&k, &cmdsq, &cd4);
        let phi = FiveIsogeny::new(&k, &k2);
        assert!(bool::from(phi.eval(&k).x.is_zero()));
        assert!(bool::from(phi.eval(&k2).x.is_zero()));
    }
}

//! The isogeny-walk engine.
//!
//! One traversal serves every degree, curve model and direction: the
//! per-step behavior (how to multiply by ℓ, how to derive the codomain and
//! push points through one ℓ-isogeny) is supplied through [`WalkOps`], and
//! the schedule through [`Schedule`].

use crypto_bigint::modular::ConstMontyParams;
use zeroize::Zeroize;

use crate::field::{FieldParams, Fp2};
use crate::point::ProjectivePoint;
use crate::strategy::Schedule;

/// Evaluator for a single computed ℓ-isogeny.
pub trait IsogenyMap<M: ConstMontyParams<L>, const L: usize> {
    /// Push a point through the isogeny.
    fn eval(&self, p: &ProjectivePoint<M, L>) -> ProjectivePoint<M, L>;
}

/// Per-step operations of one walk flavor.
pub trait WalkOps<M: FieldParams<L>, const L: usize> {
    /// The evaluator produced at each step.
    type Map: IsogenyMap<M, L>;

    /// Multiply the working point by ℓ^m.
    fn advance(&self, r: &ProjectivePoint<M, L>, m: usize) -> ProjectivePoint<M, L>;

    /// Consume a kernel point of exact order ℓ: update the tracked codomain
    /// constants and return the evaluator for this step.
    fn step(&mut self, kernel: &ProjectivePoint<M, L>) -> Self::Map;
}

/// Strategy-driven traversal of the implicit isogeny tree.
///
/// On entry `r` is a kernel generator of order ℓ^height; on return it has
/// exact order ℓ and the final codomain/evaluation step is left to the
/// caller, since key generation and agreement finish differently.
///
/// `N` bounds the stack of saved interior points; it is a compile-time
/// constant derived from the strategy, and the saved points are wiped before
/// returning since they are secret-derived. At the top of each row the stack
/// holds exactly the roots of the not-yet-processed subtrees on the current
/// path, in depth order.
pub fn traverse<M, const L: usize, O, const N: usize>(
    ops: &mut O,
    schedule: &mut Schedule<'_>,
    height: usize,
    r: &mut ProjectivePoint<M, L>,
    basis: &mut [ProjectivePoint<M, L>],
) where
    M: FieldParams<L>,
    O: WalkOps<M, L>,
{
    let mut pts = [ProjectivePoint::<M, L>::from_affine(Fp2::ZERO); N];
    let mut pts_index = [0usize; N];
    let mut npts = 0;
    let mut index = 0;

    for row in 1..height {
        while index < height - row {
            debug_assert!(npts < N);
            pts[npts] = *r;
            pts_index[npts] = index;
            npts += 1;
            let m = schedule.next(row, index, height);
            *r = ops.advance(r, m);
            index += m;
        }
        let map = ops.step(r);

        for p in pts.iter_mut().take(npts) {
            *p = map.eval(p);
        }
        for b in basis.iter_mut() {
            *b = map.eval(b);
        }

        npts -= 1;
        *r = pts[npts];
        index = pts_index[npts];
    }

    pts.zeroize();
}

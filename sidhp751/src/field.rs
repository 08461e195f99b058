//! Field instantiation for p = 2^372·3^239 − 1 and the byte codecs tied to
//! its encoding sizes.

use crypto_bigint::{U768, impl_modulus};
use isogeny::FieldParams;

use crate::{FP2_SIZE, PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE};

impl_modulus!(
    P751,
    U768,
    "00006FE5D541F71C0E12909F97BADC668562B5045CB25748084E9867D6EBE876DA959B1A13F7CC76E3EC968549F878A8EEAFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
);

impl FieldParams<{ U768::LIMBS }> for P751 {
    const INV_EXP: U768 = U768::from_be_hex(
        "00006FE5D541F71C0E12909F97BADC668562B5045CB25748084E9867D6EBE876DA959B1A13F7CC76E3EC968549F878A8EEAFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFD",
    );
    const SQRT_EXP: U768 = U768::from_be_hex(
        "00001BF975507DC70384A427E5EEB719A158AD41172C95D20213A619F5BAFA1DB6A566C684FDF31DB8FB25A1527E1E2A3BAC00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    const TWO_INV: U768 = U768::from_be_hex(
        "000037F2EAA0FB8E0709484FCBDD6E3342B15A822E592BA404274C33EB75F43B6D4ACD8D09FBE63B71F64B42A4FC3C54775800000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
}

pub(crate) const LIMBS: usize = U768::LIMBS;

pub(crate) type Fp = isogeny::Fp<P751, LIMBS>;
pub(crate) type Fp2 = isogeny::Fp2<P751, LIMBS>;

pub(crate) fn encode_pk(points: &[Fp2; 3]) -> [u8; PUBLIC_KEY_SIZE] {
    let mut out = [0u8; PUBLIC_KEY_SIZE];
    for (point, chunk) in points.iter().zip(out.chunks_exact_mut(FP2_SIZE)) {
        point.write_bytes(chunk);
    }
    out
}

pub(crate) fn decode_pk(bytes: &[u8; PUBLIC_KEY_SIZE]) -> [Fp2; 3] {
    let mut chunks = bytes.chunks_exact(FP2_SIZE);
    [
        Fp2::read_bytes(chunks.next().expect("sized above")),
        Fp2::read_bytes(chunks.next().expect("sized above")),
        Fp2::read_bytes(chunks.next().expect("sized above")),
    ]
}

pub(crate) fn encode_ss(j: &Fp2) -> [u8; SHARED_SECRET_SIZE] {
    let mut out = [0u8; SHARED_SECRET_SIZE];
    j.write_bytes(&mut out);
    out
}

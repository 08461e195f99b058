//! Field instantiation for p = 2^67·3^175·5^119 − 1 and the byte codecs
//! tied to its encoding sizes.

use crypto_bigint::{U640, impl_modulus};
use isogeny::FieldParams;

use crate::{FP2_SIZE, PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE};

impl_modulus!(
    P610,
    U640,
    "00001998BB83972CC9C2C1E5A0BB4E65E360D148D97F2482D3E1FB37B4236445E33DD37E7619FF4BE9FE448E3C61D24AFBB5A9C32A8591945E44CA3E846082DD98D4AA8E88E4E877FFFFFFFFFFFFFFFF"
);

impl FieldParams<{ U640::LIMBS }> for P610 {
    const INV_EXP: U640 = U640::from_be_hex(
        "00001998BB83972CC9C2C1E5A0BB4E65E360D148D97F2482D3E1FB37B4236445E33DD37E7619FF4BE9FE448E3C61D24AFBB5A9C32A8591945E44CA3E846082DD98D4AA8E88E4E877FFFFFFFFFFFFFFFD",
    );
    const SQRT_EXP: U640 = U640::from_be_hex(
        "000006662EE0E5CB3270B079682ED39978D83452365FC920B4F87ECDED08D91178CF74DF9D867FD2FA7F91238F187492BEED6A70CAA164651791328FA11820B766352AA3A2393A1E0000000000000000",
    );
    const TWO_INV: U640 = U640::from_be_hex(
        "00000CCC5DC1CB9664E160F2D05DA732F1B068A46CBF924169F0FD9BDA11B222F19EE9BF3B0CFFA5F4FF22471E30E9257DDAD4E19542C8CA2F22651F4230416ECC6A55474472743C0000000000000000",
    );
}

pub(crate) const LIMBS: usize = U640::LIMBS;

pub(crate) type Fp = isogeny::Fp<P610, LIMBS>;
pub(crate) type Fp2 = isogeny::Fp2<P610, LIMBS>;

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

//! Checked-in parameters: basis generators for both curve models and the
//! serialized optimal strategy tables.
//!
//! Field constants are stored as canonical big-endian hex and converted to
//! Montgomery form at compile time. Strategy tables are consumed front to
//! back, one entry per descent.

use crypto_bigint::U768;

use crate::field::{Fp, Fp2};

const fn fe(hex: &str) -> Fp {
    Fp::new(&U768::from_be_hex(hex))
}

const fn fp2(re: &str, im: &str) -> Fp2 {
    Fp2 { re: fe(re), im: fe(im) }
}

/// Height of Alice's isogeny tree (2^372 torsion, two doublings per level).
pub(crate) const ALICE_WALK_LEN: usize = 186;

/// Height of Bob's isogeny tree (3^239 torsion).
pub(crate) const BOB_WALK_LEN: usize = 239;

/// Ladder length and top-byte mask for Alice's scalar.
pub(crate) const ALICE_SCALAR_BITS: usize = 372;
pub(crate) const ALICE_MASK: u8 = 0x0F;

/// Ladder length and top-byte mask for Bob's scalar.
pub(crate) const BOB_SCALAR_BITS: usize = 378;
pub(crate) const BOB_MASK: u8 = 0x03;

/// Deepest saved-point stacks reached by the strategies.
pub(crate) const MAX_INT_POINTS_ALICE: usize = 8;
pub(crate) const MAX_INT_POINTS_BOB: usize = 8;

/// x(P), x(Q), x(P - Q) of Alice's basis on the Montgomery base curve.
pub(crate) const ALICE_GEN: [Fp2; 3] = [
    fp2(
        "00004514F8CC94B140F24874F8B87281FA6004CA5B3637C68AC0C0BDB29838051F385FBBCC300BBB24BFBBF6710D7DC8B29ACB81E429BD1BD5629AD0ECAD7C90622F6BB801D0337EE6BC78A7F12FDCB09DECFAE8BFD643C89C3BAC1D87F8B6FA",
        "0000158ABF500B5914B3A96CED5FDB37D6DD925F2D6E4F7FEA3CC16E1085754077737EA6F8CC74938D971DA289DCF2435BCAC1897D2627693F9BB167DC01BE34AC494C60B8A0F65A28D7A31EA0D54640653A8099CE5A84E4F0168D818AF02041",
    ),
    fp2(
        "00001723D2BFA01A78BF4E39E3A333F8A7E0B415A17F208D3419E7591D59D8ABDB7EE6D2B2DFCB21AC29A40F837983C0F057FD041AD93237704F1597D87F074F682961A38B5489D1019924F8A0EF5E4F1B2E64A7BA536E219F5090F76276290E",
        "00002569D7EAFB6C60B244EF49E05B5E23F73C4F44169A7E02405E90CEB680CB0756054AC0E3DCE95E2950334262CC973235C2F87D89500BCD465B078BD0DEBDF322A2F86AEDFDCFEE65C09377EFBA0C5384DD837BEDB710209FBC8DDB8C35C7",
    ),
    fp2(
        "00006066E07F3C0D964E8BC963519FAC8397DF477AEA9A067F3BE343BC53C883AF29CCF008E5A30719A29357A8C33EB3600CD078AF1C40ED5792763A4D213EBDE44CC623195C387E0201E7231C529A15AF5AB743EE9E7C9C37AF3051167525BB",
        "000050E30C2C06494249BC4A144EB5F31212BD05A2AF0CB3064C322FC3604FC5F5FE3A08FB3A02B05A48557E15C992254FFC8910B72B8E1328B4893CDCFBFC003878881CE390D909E39F83C5006E0AE979587775443483D13C65B107FADA5165",
    ),
];

/// x(P), x(Q), x(P - Q) of Bob's basis on the Montgomery base curve.
pub(crate) const BOB_GEN: [Fp2; 3] = [
    fp2(
        "0000605D4697A245C394B98024A5554746DC12FF56D0C6F15D2F48123B6D9C498EEE98E8F7CD6E216E2F1FF7CE0C969CCA29CAA2FAA57174EF985AC0A504260018760E9FDF67467E20C13982FF5B49B8BEAB05F6023AF873F827400E453432FE",
        "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    ),
    fp2(
        "00005BF9544781803CBD7E0EA8B96D934C5CBCA970F9CC327A0A7E4DAD931EC29BAA8A854B8A9FDE5409AF96C5426FA375D99C68E9AE714172D7F04502D45307FA4839F39A28338BBAFD54A461A535408367D5132E6AA0D3DA6973360F8CD0F1",
        "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    ),
    fp2(
        "000055E5124A05D4809585F67FE9EA1F02A06CD411F38588BB631BF789C3F98D1C3325843BB53D9B011D8BD1F682C0E4D8A5E723364364E40DAD1B7A476716AC7D1BA705CCDD680BFD4FE4739CC21A9A59ED544B82566BF633E8950186A79FE3",
        "00005AC57EAFD6CC7569E8B53A148721953262C5B404C143380ADCC184B6C21F0CAFE095B7E9C79CA88791F9A72F1B2F3121829B2622515B694A16875ED637F421B539E66F2FEF1CE8DCEFC8AEA608055E9C44077266AB64611BF851BA06C821",
    ),
];

/// w(P), w(Q), w(P - Q) of Alice's basis on the Huff base curve.
pub(crate) const ALICE_GEN_HUFF: [Fp2; 3] = [
    fp2(
        "00003F47BB0417AFF57F170FE26D6A17D8D9B08112987A69D7E0172F416A80F51E44BE03CEC146A2A660BE2814997847800C1E3A27A5ABCD80DA5E4318D975251D2BBEBC378EFBBAA23A3FA8220AAE153BDB3519BB377C440DDEC04F03511933",
        "0000322B238BB9D56320B17BBAF0DC52E73C18AD2202AA738137DB811B89E4A2C62334FB99F3C123B7DFDCE8014F70CD4F8B6BD68A2A88BAF62BBEEFEE7BE3FB13AE49E1BD452E785F0F96E08EB6F93B463AAEEFE2BEC88126608C727BE98427",
    ),
    fp2(
        "0000145120D69EFDA1139B7D84C34AC219AB9DE74A4154843E7E45ED0114C3388AD26B9B6773C13DB6895A706684232EF12BDB18CB0FC0530DD302EC6577F1080ABF3CC61A1F640DAA7F201C8FD201EFBA6080A288E624AD4D96EE75155A4D59",
        "000017597CC7EAD8982CBE8EB32601E696ED9F2AF5DF37A66859939DF254A35F1CFEB38B800BE1F16CBC1C037B8D64A2198BAF921499A366AA72CAE0B82F01CA0CD1E5F967DAC2FFECD25C9BE07D61C95A91FB46499DF04383830A5D00262DF4",
    ),
    fp2(
        "000003F0F352F17BE61CB1C11819A7178EA8C2C9C55041A538E2C5DE8D56210DD57AD22AC7B14132D3D3860CB091B4D0A8C310B7EB8C8694FC350DCBBD2E17D41D70763781B30BE5C9E78CCE1439296523520BFA8EA9C0E6F7F2F0ED6FCEF37F",
        "00000F79A0F9773E03B21334460CD6FDF29AA261E8B911BB5C61DCE80938F1D78418841F77BEDB8299C48A21DDF4D8D75839CDB765F561FFCB2D02E4E9C13789A2D7C431E94F0F6AB3B721CE8104B7D84C70D7741BEF5737229E456C8121BF42",
    ),
];

/// w(P), w(Q), w(P - Q) of Bob's basis on the Huff base curve.
pub(crate) const BOB_GEN_HUFF: [Fp2; 3] = [
    fp2(
        "000057F38016097F2263876414DB44B4D7959EFD81B4B5F0CAA289EF3FE0583F7DE7F979CBEB297D82256B2ADF1F6EDD13D86ACF2B2ED8F32DCECF0C198D2DF6AF67C598D810538C4897804CD1E02E0F5068F676233BC27F5781DEFAAC30670F",
        "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    ),
    fp2(
        "000028515A14BB39E6C1813764EF6E2E31F63E2A8ECFEAD00D3F44EBC077231C08253C9BC728E851060D76DF513C9200C65B07465A30238DDFCBF84DA5EB6B1BF3454EE2FB5FCDDDD213E09622F8931B7B5D18572B657305FDB944718462BE7E",
        "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    ),
    fp2(
        "00003BD47F70C4F2A6D7C91F64F46A51A024C9B13C102DE8D0DD1EB60BCDB6481E6DBCB0E1ADCAD7343885845AFEDCC11DA52BCCF1FB7C6258DE5DFF09B7B4CD43F33A3F7BEA352AB4E0FE7C950AF1F5B7EDF66360E06F864C02CDBB505A4519",
        "0000537409BBB29FDD6510761BCF51606CA368AFE026C036F77955BA084EAB1BBEB176DBBEA472840304A9B55882436C474F53584E1F83E9DE1E95A2CBF567B4FE09852F82BE247833F49CB3532E5AC6D89D82985D1993846751816325A739FC",
    ),
];

/// Traversal schedule for Alice's isogeny tree.
pub(crate) const ALICE_STRATEGY: [u8; 185] = [
    80, 48, 27, 15, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 2, 1, 1, 3, 2,
    1, 1, 1, 1, 12, 7, 4, 2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 5, 3, 2, 1, 1, 1, 1, 2, 1, 1, 1,
    21, 12, 7, 4, 2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 5, 3, 2, 1, 1, 1, 1, 2, 1, 1, 1, 9, 5, 3,
    2, 1, 1, 1, 1, 2, 1, 1, 1, 4, 2, 1, 1, 1, 2, 1, 1, 33, 20, 12, 7, 4, 2, 1, 1, 2, 1, 1, 3,
    2, 1, 1, 1, 1, 5, 3, 2, 1, 1, 1, 1, 2, 1, 1, 1, 8, 5, 3, 2, 1, 1, 1, 1, 2, 1, 1, 1, 4, 2,
    1, 1, 2, 1, 1, 16, 8, 4, 2, 1, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1,
    4, 2, 1, 1, 2, 1, 1
];

/// Traversal schedule for Bob's isogeny tree.
pub(crate) const BOB_STRATEGY: [u8; 238] = [
    112, 63, 32, 16, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2,
    1, 1, 2, 1, 1, 16, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1, 4,
    2, 1, 1, 2, 1, 1, 31, 16, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1,
    1, 4, 2, 1, 1, 2, 1, 1, 15, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 2,
    1, 1, 3, 2, 1, 1, 1, 1, 49, 31, 16, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2,
    1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 15, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 7, 4,
    2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 21, 12, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 5,
    3, 2, 1, 1, 1, 1, 2, 1, 1, 1, 9, 5, 3, 2, 1, 1, 1, 1, 2, 1, 1, 1, 4, 2, 1, 1, 1, 2, 1, 1
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Replay a serialized schedule without field arithmetic, checking the
    /// row bookkeeping and the deepest saved-point stack it ever needs.
    fn walk_shape(strategy: &[u8], height: usize) -> usize {
        let mut stack = [0usize; 64];
        let mut npts = 0;
        let mut deepest = 0;
        let mut index = 0;
        let mut pos = 0;
        for row in 1..height {
            while index < height - row {
                stack[npts] = index;
                npts += 1;
                deepest = deepest.max(npts);
                let m = strategy[pos] as usize;
                pos += 1;
                assert!(m >= 1, "stalled descent");
                index += m;
                assert!(index <= height - row, "descent overshoots the row");
            }
            npts -= 1;
            index = stack[npts];
        }
        assert_eq!(npts, 0);
        deepest
    }

    #[test]
    fn strategies_traverse_completely_within_their_stack_bounds() {
        assert_eq!(walk_shape(&ALICE_STRATEGY, ALICE_WALK_LEN), MAX_INT_POINTS_ALICE);
        assert_eq!(walk_shape(&BOB_STRATEGY, BOB_WALK_LEN), MAX_INT_POINTS_BOB);
    }
}

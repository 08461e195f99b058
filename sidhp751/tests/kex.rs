//! End-to-end key-exchange tests: checked-in vectors, agreement round
//! trips, and the tolerated-degradation scenarios (tampered keys, zero
//! scalars).

use rand_core::OsRng;
use sidhp751::{
    ALICE_SECRET_SIZE, AliceSecret, BOB_SECRET_SIZE, BobSecret, PUBLIC_KEY_SIZE, PublicKey,
    SHARED_SECRET_SIZE, huff,
};

const KAT2_PKA: &str = "df3e4b228888a908d85c1507d0b2d39bccd4d4f6cadeb48abd751b52fe5c114489f8501a7785131561ed3110536159dd2908cbcd6487fb79ac5a3f6e318fb63dd26d179447e8c8e728719d0dce248d4f5b759b8fdf3a6febfdeaf55cd05021e898439c7d1c579bc450cbc346e06bdc8c8c8698be1a3a304beff0c3305a2e9e199de4e08db21160ebf4baca6ce459b463dc2f0ab483440637fadb7270eda270f84a4aa7c78d4e2f01ac1ec1314be84cea2da02dce95851520d475135e41cdc64175316464e2822003dfe3cb3e20bf9dc473a84f6db47801ffc58decb95b9ca527309add5fe67af95f0461f003a45a648125d0f9f78fcc907a1aa9b244668fcaa02557d3e14c80dfee5301691314c2fd7f0473198728064f9a4912e07b121bfad9663217483e9fd04a9f995b863d42011aae2b75d7a14d67226ca63c80e0304a9ca5ba64ee7b318c92bebc25573753a904f6bdac82f34847dc0b2520414fe5be6b6f555ad1312b0d114c2c153b7a2da96a51e7a4ecc492f01239c757ae50cc1adda3e45dc62bd1ec4dd8ec73d4a0c26d6b43d54e40f87569b18396493a1ec0e45d0b1cc59995271db1dcc8ce89e4f53b0535416db1211c6cd45cfac308ff35f16743d42a3d8bec84ab789ed72ae70742d084e1bc091f6c7eb1a8fc4c5bb64c80cd12d0990446db56f6980ce236008505c8e8856abe9df85ce62e115516ead87a5e078ad496d0dafdfd916715bd3227ffaa1c0778ae4f9080eb3825c87891e64db8418b22e858cabe599abbda65fbe69887467b0c4b";

const KAT2_SS: &str = "97677713629e71b1073c9e2fee6664a9ac58bf882155e2e6578439faaf8ec3d385348f8bfdb996d03aec861d7ae8c554cf88003fdf02da68bea4b6643abbe05da1977e6cb74d463cd58443e7c844b9c61a8d1535948989ef6b2f69bc20550d4a241ef684ba00edb2345c7a401af64539f4a514f5f037de11c132ab2cd7f3ac7a6bc7f04a7a5ab3b074bb8839db488d536620a586f36ce43257cc864850e761757ae5c3f475d5c073a792de3bf51f42e8e28bfbb53b450857d988ad41";

const KAT_HUFF_SS: &str = "97677713629e71b1073c9e2fee6664a9ac58bf882155e2e6578439faaf8ec3d385348f8bfdb996d03aec861d7ae8c554cf88003fdf02da68bea4b6643abbe05da1977e6cb74d463cd58443e7c844b9c61a8d1535948989ef6b2f69bc20550d4a241ef684ba00edb2345c7a401af64539f4a514f5f037de11c132ab2cd7f3ac7a6bc7f04a7a5ab3b074bb8839db488d536620a586f36ce43257cc864850e761757ae5c3f475d5c073a792de3bf51f42e8e28bfbb53b450857d988ad41";

fn kat_secrets() -> (AliceSecret, BobSecret) {
    // all-zero Alice scalar; Bob scalar 0x01 followed by zeros
    let mut skb = [0u8; BOB_SECRET_SIZE];
    skb[0] = 0x01;
    (
        AliceSecret::from_bytes(&[0u8; ALICE_SECRET_SIZE]),
        BobSecret::from_bytes(&skb),
    )
}

#[test]
fn kat2_montgomery() {
    let (alice, bob) = kat_secrets();

    let pka = alice.public_key();
    let pkb = bob.public_key();
    assert_eq!(hex::encode(pka.as_bytes()), KAT2_PKA);

    let ss_a = alice.agree(&pkb);
    let ss_b = bob.agree(&pka);
    assert_eq!(ss_a.as_bytes(), ss_b.as_bytes());
    assert_eq!(hex::encode(ss_a.as_bytes()), KAT2_SS);
}

#[test]
fn kat2_huff() {
    let mut skb = [0u8; BOB_SECRET_SIZE];
    skb[0] = 0x01;
    let alice = huff::AliceSecret::from_bytes(&[0u8; ALICE_SECRET_SIZE]);
    let bob = huff::BobSecret::from_bytes(&skb);

    let ss_a = alice.agree(&bob.public_key());
    let ss_b = bob.agree(&alice.public_key());
    assert_eq!(ss_a.as_bytes(), ss_b.as_bytes());
    assert_eq!(hex::encode(ss_a.as_bytes()), KAT_HUFF_SS);
}

#[test]
fn models_agree_on_the_same_scalars() {
    // The Huff basis generators are the isomorphic images of the Montgomery
    // ones, so the terminal curves coincide.
    assert_eq!(KAT2_SS, KAT_HUFF_SS);
}

#[test]
fn random_agreement() {
    let alice = AliceSecret::random(&mut OsRng).expect("rng failure");
    let bob = BobSecret::random(&mut OsRng).expect("rng failure");
    let ss_a = alice.agree(&bob.public_key());
    let ss_b = bob.agree(&alice.public_key());
    assert_eq!(ss_a.as_bytes(), ss_b.as_bytes());
}

#[test]
fn random_agreement_huff() {
    let alice = huff::AliceSecret::random(&mut OsRng).expect("rng failure");
    let bob = huff::BobSecret::random(&mut OsRng).expect("rng failure");
    let ss_a = alice.agree(&bob.public_key());
    let ss_b = bob.agree(&alice.public_key());
    assert_eq!(ss_a.as_bytes(), ss_b.as_bytes());
}

#[test]
fn tampered_public_key_still_completes() {
    let (alice, bob) = kat_secrets();

    let pka = alice.public_key();
    let good = bob.agree(&pka);

    let mut bytes = *pka.as_bytes();
    bytes[0] ^= 1;
    let bad = bob.agree(&PublicKey::from_bytes(&bytes));

    // rejection is the KEM wrapper's duty; here the walk must run to
    // completion and produce a well-formed, different secret
    assert_ne!(good.as_bytes(), bad.as_bytes());
}

#[test]
fn masking_is_applied() {
    let alice = AliceSecret::from_bytes(&[0xffu8; ALICE_SECRET_SIZE]);
    assert_eq!(alice.as_bytes()[ALICE_SECRET_SIZE - 1], 0x0f);
    let bob = BobSecret::from_bytes(&[0xffu8; BOB_SECRET_SIZE]);
    assert_eq!(bob.as_bytes()[BOB_SECRET_SIZE - 1], 0x03);
}

#[test]
fn encoded_sizes() {
    assert_eq!(PUBLIC_KEY_SIZE, 564);
    assert_eq!(SHARED_SECRET_SIZE, 188);
    let (alice, _) = kat_secrets();
    assert_eq!(alice.public_key().as_bytes().len(), PUBLIC_KEY_SIZE);
}

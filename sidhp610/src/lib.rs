#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

mod constants;
mod field;
mod sidh;

pub mod huff;

pub use isogeny::Error;
pub use sidh::{AliceSecret, BobSecret, PublicKey, SharedSecret};

/// Size of one canonical little-endian GF(p) encoding in bytes.
///
/// The prime weighs in at 621 bits, so 78 bytes (the family name "p610" is
/// inherited from the reference parameter set).
pub const FIELD_ELEMENT_SIZE: usize = 78;

/// Size of one GF(p²) encoding: real part then imaginary part.
pub const FP2_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;

/// Size of a public key: x(ϕ(P)) ‖ x(ϕ(Q)) ‖ x(ϕ(P−Q)).
pub const PUBLIC_KEY_SIZE: usize = 3 * FP2_SIZE;

/// Size of a shared secret: one GF(p²) j-invariant encoding.
pub const SHARED_SECRET_SIZE: usize = FP2_SIZE;

/// Size of Alice's secret scalar in bytes (306 significant bits).
pub const ALICE_SECRET_SIZE: usize = 39;

/// Size of Bob's secret scalar in bytes (406 significant bits).
pub const BOB_SECRET_SIZE: usize = 51;

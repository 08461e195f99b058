#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

#[cfg(test)]
extern crate std;

mod error;
mod field;
mod point;
mod strategy;
#[cfg(test)]
mod testutil;
mod walk;

pub mod huff;
pub mod kex;
pub mod montgomery;

pub use crate::{
    error::Error,
    field::{FieldParams, Fp, Fp2},
    point::ProjectivePoint,
    strategy::{Schedule, WalkParams},
    walk::{IsogenyMap, WalkOps, traverse},
};
pub use crypto_bigint;
pub use rand_core;
pub use subtle;
pub use zeroize;

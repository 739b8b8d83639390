//! Multihash digests for Affinidi TDK
//!
//! This crate provides:
//! - A registry of the supported hash algorithms and their multihash codes
//! - The `[code][length][digest]` envelope, with truncation
//! - Hex, base58 and base64 text encodings, with base inference for bare text
//! - Checking a payload against an encoded multihash
//!
//! ```
//! use affinidi_multihash::{Algorithm, Base, check, digest};
//!
//! let mh = digest(Algorithm::Sha1, b"test");
//! let encoded = mh.encode(Base::Base58).unwrap();
//! assert_eq!(encoded, "5dt9CqvXK9qs7vazf7k7ZRqe28VPTg");
//! assert!(check(&encoded, b"test").unwrap());
//! ```

pub mod base;
pub mod check;
pub mod digest;
pub mod envelope;
pub mod hasher;
pub mod registry;

pub use base::{Base, decode, encode, infer_base};
pub use check::{check, check_reader, check_with_base};
pub use digest::{
    MultihashHasher, digest, digest_streaming, digest_with, truncated_digest,
    truncated_digest_with, weak_digest,
};
pub use envelope::{Envelope, Multihash, WeakMultihash};
pub use registry::{
    Algorithm, AlgorithmDescriptor, AlgorithmId, REGISTRY, lookup_by_code, lookup_by_name,
};

mod error;
pub use error::{MultihashError, Result};

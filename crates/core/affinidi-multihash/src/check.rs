//! Verifying a payload against an encoded multihash
//!
//! Decode, parse, recompute, compare. Each stage stops on the first failure,
//! and a structurally broken multihash is an error, never a plain `false`.

use std::io::Read;

use tracing::debug;

use crate::{
    Result,
    base::{self, Base},
    digest::truncated_digest_with,
    envelope::{Envelope, WeakMultihash},
    hasher,
    registry::AlgorithmId,
};

/// Check `payload` against `encoded`, inferring both base and algorithm.
///
/// ```
/// use affinidi_multihash::check;
///
/// assert!(check("1114a94a8fe5ccb19ba61c4c0873d391e987982fbbd3", b"test").unwrap());
/// assert!(!check("1114a94a8fe5ccb19ba61c4c0873d391e987982fbbd3", b"other").unwrap());
/// ```
pub fn check(encoded: &str, payload: &[u8]) -> Result<bool> {
    check_with_base(base::infer_base(encoded)?, encoded, payload)
}

/// Check `payload` against `encoded` text in a known base
pub fn check_with_base(base: Base, encoded: &str, payload: &[u8]) -> Result<bool> {
    let expected = WeakMultihash::decode_with(base, encoded)?;
    let matched = expected.verify(payload)?;
    if !matched {
        debug!(
            "payload does not match multihash ({}, {} bytes)",
            expected.name(),
            expected.length()
        );
    }
    Ok(matched)
}

/// Check a streamed payload against `encoded`, inferring base and algorithm.
///
/// The reader is only touched once the encoded text has parsed.
pub fn check_reader<R: Read>(encoded: &str, reader: R) -> Result<bool> {
    let expected = WeakMultihash::decode(encoded)?;
    let digest = hasher::hash_reader(expected.algorithm().algorithm, reader)?;
    let actual = Envelope::build(expected.algorithm(), digest, expected.length())?;
    Ok(actual == expected)
}

impl<A: AlgorithmId> Envelope<A> {
    /// Recompute over `payload` with this algorithm and declared length.
    ///
    /// A declared length the algorithm can't produce is an error, not a
    /// mismatch.
    pub fn verify(&self, payload: &[u8]) -> Result<bool> {
        let actual = truncated_digest_with(self.algorithm(), payload, self.length())?;
        Ok(actual.to_bytes() == self.to_bytes())
    }
}

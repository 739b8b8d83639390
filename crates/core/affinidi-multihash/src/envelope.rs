//! Multihash envelope
//!
//! Binary layout, one byte per header field:
//!
//! ```text
//! byte 0     : algorithm code
//! byte 1     : declared digest length
//! bytes 2..  : the first `declared length` bytes of the digest
//! ```
//!
//! See: <https://github.com/multiformats/multihash>

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use tracing::debug;

use crate::{
    Algorithm, AlgorithmDescriptor, MultihashError, Result,
    base::{self, Base},
    registry::{AlgorithmId, lookup_by_code},
};

/// Size of the `[code][length]` header
pub const HEADER_LEN: usize = 2;

/// Largest length the one byte header field can carry
pub const MAX_DIGEST_LEN: usize = u8::MAX as usize;

/// A digest wrapped with its algorithm code and declared length.
///
/// The full digest is kept even when the envelope is truncated, only the
/// declared prefix is serialized or compared.
#[derive(Clone, Debug)]
pub struct Envelope<A: AlgorithmId> {
    algorithm: A,
    length: u8,
    digest: Vec<u8>,
}

/// Envelope bound to one of the statically known algorithms
pub type Multihash = Envelope<Algorithm>;

/// Envelope whose algorithm was resolved at runtime from a name or header byte
pub type WeakMultihash = Envelope<&'static AlgorithmDescriptor>;

impl<A: AlgorithmId> Envelope<A> {
    /// Wrap the native `digest`, declaring the first `length` bytes.
    ///
    /// Fails with `InvalidLength` unless `digest` is exactly the algorithm's
    /// native length and `0 < length <= native length`.
    pub fn build(algorithm: A, digest: Vec<u8>, length: usize) -> Result<Self> {
        let native = algorithm.descriptor().length;
        if digest.len() != native {
            return Err(MultihashError::InvalidLength {
                length: digest.len(),
                max: native,
            });
        }

        Envelope::with_prefix(algorithm, digest, length)
    }

    /// Declare the first `length` of the held bytes. `digest` may be the
    /// native digest or a parsed prefix, never longer than native.
    fn with_prefix(algorithm: A, digest: Vec<u8>, length: usize) -> Result<Self> {
        let max = digest.len().min(MAX_DIGEST_LEN);
        if length == 0 || length > max {
            return Err(MultihashError::InvalidLength { length, max });
        }

        Ok(Envelope {
            algorithm,
            length: length as u8,
            digest,
        })
    }

    /// Wrap the untruncated output of the algorithm's hasher
    pub(crate) fn from_native(algorithm: A, digest: Vec<u8>) -> Self {
        debug_assert_eq!(digest.len(), algorithm.descriptor().length);
        Envelope {
            algorithm,
            // Registered lengths all fit in the header byte
            length: algorithm.descriptor().length as u8,
            digest,
        }
    }

    /// Parse the binary form.
    ///
    /// Any header problem (short input, unregistered code, declared length not
    /// matching the remaining bytes) is reported as `CorruptedHeader`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [code, length, digest @ ..] = bytes else {
            debug!("multihash shorter than its header ({} bytes)", bytes.len());
            return Err(MultihashError::CorruptedHeader("missing header".into()));
        };

        let descriptor = lookup_by_code(*code).map_err(|e| {
            debug!("multihash header: {e}");
            MultihashError::CorruptedHeader(format!("unknown algorithm code 0x{code:02x}"))
        })?;

        let length = *length as usize;
        if length == 0 || length != digest.len() || length > descriptor.length {
            debug!(
                "multihash ({}) declares {length} bytes, {} present",
                descriptor.name,
                digest.len()
            );
            return Err(MultihashError::invalid_length());
        }

        // Only the declared prefix is on the wire
        Envelope::with_prefix(A::from_descriptor(descriptor), digest.to_vec(), length)
    }

    /// Decode text, inferring the base from its characters
    pub fn decode(text: &str) -> Result<Self> {
        Self::decode_with(base::infer_base(text)?, text)
    }

    /// Decode text in a known base
    pub fn decode_with(base: Base, text: &str) -> Result<Self> {
        Self::from_bytes(&base::decode(base, text)?)
    }

    pub fn algorithm(&self) -> A {
        self.algorithm
    }

    pub fn code(&self) -> u8 {
        self.algorithm.code()
    }

    pub fn name(&self) -> &'static str {
        self.algorithm.descriptor().name
    }

    /// Declared length
    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// The declared (possibly truncated) digest bytes
    pub fn digest(&self) -> &[u8] {
        &self.digest[..self.length()]
    }

    /// Every digest byte held, including those past the declared length
    pub fn full_digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn is_truncated(&self) -> bool {
        self.length() < self.digest.len()
    }

    /// Re-declare the length. Works in both directions as long as the full
    /// digest is still held; a parsed envelope can only shrink.
    pub fn truncate(&self, length: usize) -> Result<Self> {
        Envelope::with_prefix(self.algorithm, self.digest.clone(), length)
    }

    /// Serialized `[code][length][digest prefix]`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(HEADER_LEN + self.length());
        result.push(self.code());
        result.push(self.length);
        result.extend_from_slice(self.digest());
        result
    }

    /// Serialize and render in the given base
    pub fn encode(&self, base: Base) -> Result<String> {
        base::encode(base, &self.to_bytes())
    }
}

impl Multihash {
    pub fn to_weak(&self) -> WeakMultihash {
        Envelope {
            algorithm: self.algorithm.descriptor(),
            length: self.length,
            digest: self.digest.clone(),
        }
    }
}

impl WeakMultihash {
    pub fn to_strict(&self) -> Multihash {
        Envelope {
            algorithm: self.algorithm.algorithm,
            length: self.length,
            digest: self.digest.clone(),
        }
    }
}

impl From<WeakMultihash> for Multihash {
    fn from(value: WeakMultihash) -> Self {
        Envelope {
            algorithm: value.algorithm.algorithm,
            length: value.length,
            digest: value.digest,
        }
    }
}

impl From<Multihash> for WeakMultihash {
    fn from(value: Multihash) -> Self {
        Envelope {
            algorithm: value.algorithm.descriptor(),
            length: value.length,
            digest: value.digest,
        }
    }
}

/// Same code, same declared length, same declared bytes
impl<A: AlgorithmId, B: AlgorithmId> PartialEq<Envelope<B>> for Envelope<A> {
    fn eq(&self, other: &Envelope<B>) -> bool {
        self.code() == other.code() && self.digest() == other.digest()
    }
}

impl<A: AlgorithmId> Eq for Envelope<A> {}

impl<A: AlgorithmId> Hash for Envelope<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
        self.digest().hash(state);
    }
}

/// Hex rendering of the serialized form
impl<A: AlgorithmId> fmt::Display for Envelope<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

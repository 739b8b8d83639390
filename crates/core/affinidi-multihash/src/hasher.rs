//! Adapter over the RustCrypto hash implementations
//!
//! The multihash layer only needs `hash(algorithm, bytes)` and an incremental
//! form of it for streamed input.

use std::io::{self, Read};

use sha2::Digest;

use crate::Algorithm;

/// Chunk size used when draining a reader
const READ_CHUNK: usize = 64 * 1024;

/// Incremental hash state for any registered algorithm
#[derive(Clone)]
pub enum Hasher {
    Sha1(sha1::Sha1),
    Sha2_256(sha2::Sha256),
    Sha2_512(sha2::Sha512),
    Sha3_512(sha3::Sha3_512),
    Sha3_384(sha3::Sha3_384),
    Sha3_256(sha3::Sha3_256),
    Sha3_224(sha3::Sha3_224),
    Blake2b512(blake2::Blake2b512),
    Blake2s256(blake2::Blake2s256),
}

impl Hasher {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Sha1 => Hasher::Sha1(sha1::Sha1::new()),
            Algorithm::Sha2_256 => Hasher::Sha2_256(sha2::Sha256::new()),
            Algorithm::Sha2_512 => Hasher::Sha2_512(sha2::Sha512::new()),
            Algorithm::Sha3_512 => Hasher::Sha3_512(sha3::Sha3_512::new()),
            Algorithm::Sha3_384 => Hasher::Sha3_384(sha3::Sha3_384::new()),
            Algorithm::Sha3_256 => Hasher::Sha3_256(sha3::Sha3_256::new()),
            Algorithm::Sha3_224 => Hasher::Sha3_224(sha3::Sha3_224::new()),
            Algorithm::Blake2b512 => Hasher::Blake2b512(blake2::Blake2b512::new()),
            Algorithm::Blake2s256 => Hasher::Blake2s256(blake2::Blake2s256::new()),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha1(h) => h.update(data),
            Hasher::Sha2_256(h) => h.update(data),
            Hasher::Sha2_512(h) => h.update(data),
            Hasher::Sha3_512(h) => h.update(data),
            Hasher::Sha3_384(h) => h.update(data),
            Hasher::Sha3_256(h) => h.update(data),
            Hasher::Sha3_224(h) => h.update(data),
            Hasher::Blake2b512(h) => h.update(data),
            Hasher::Blake2s256(h) => h.update(data),
        }
    }

    /// Consumes the state and returns the native length digest
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Hasher::Sha1(h) => h.finalize().to_vec(),
            Hasher::Sha2_256(h) => h.finalize().to_vec(),
            Hasher::Sha2_512(h) => h.finalize().to_vec(),
            Hasher::Sha3_512(h) => h.finalize().to_vec(),
            Hasher::Sha3_384(h) => h.finalize().to_vec(),
            Hasher::Sha3_256(h) => h.finalize().to_vec(),
            Hasher::Sha3_224(h) => h.finalize().to_vec(),
            Hasher::Blake2b512(h) => h.finalize().to_vec(),
            Hasher::Blake2s256(h) => h.finalize().to_vec(),
        }
    }
}

/// One-shot digest of `data`
pub fn hash(algorithm: Algorithm, data: &[u8]) -> Vec<u8> {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// Digest of everything `reader` yields. The reader is consumed once, in
/// order; an IO error discards the partial state.
pub fn hash_reader<R: Read>(algorithm: Algorithm, mut reader: R) -> io::Result<Vec<u8>> {
    let mut hasher = Hasher::new(algorithm);
    let mut buffer = vec![0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize())
}

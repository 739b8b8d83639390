//! Building multihashes from payloads

use std::io::Read;

use crate::{
    Algorithm, Result,
    envelope::{Envelope, Multihash, WeakMultihash},
    hasher::{self, Hasher},
    registry::{AlgorithmId, lookup_by_name},
};

/// Digest `payload` with its full native length
pub fn digest(algorithm: Algorithm, payload: &[u8]) -> Multihash {
    digest_with(algorithm, payload)
}

/// Digest and declare only the first `length` bytes
pub fn truncated_digest(algorithm: Algorithm, payload: &[u8], length: usize) -> Result<Multihash> {
    truncated_digest_with(algorithm, payload, length)
}

/// Digest everything `reader` yields, without holding the payload in memory
pub fn digest_streaming<R: Read>(algorithm: Algorithm, reader: R) -> Result<Multihash> {
    let digest = hasher::hash_reader(algorithm, reader)?;
    Ok(Envelope::from_native(algorithm, digest))
}

/// Digest with the algorithm named at runtime (e.g. `"sha3-512"`)
pub fn weak_digest(name: &str, payload: &[u8]) -> Result<WeakMultihash> {
    Ok(digest_with(lookup_by_name(name)?, payload))
}

/// Digest for either envelope flavour
pub fn digest_with<A: AlgorithmId>(algorithm: A, payload: &[u8]) -> Envelope<A> {
    Envelope::from_native(
        algorithm,
        hasher::hash(algorithm.descriptor().algorithm, payload),
    )
}

pub fn truncated_digest_with<A: AlgorithmId>(
    algorithm: A,
    payload: &[u8],
    length: usize,
) -> Result<Envelope<A>> {
    let digest = hasher::hash(algorithm.descriptor().algorithm, payload);
    Envelope::build(algorithm, digest, length)
}

/// Incremental multihash builder.
///
/// ```
/// use affinidi_multihash::{Algorithm, MultihashHasher, digest};
///
/// let mut hasher = MultihashHasher::new(Algorithm::Sha2_256);
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(hasher.finalize(), digest(Algorithm::Sha2_256, b"hello world"));
/// ```
#[derive(Clone)]
pub struct MultihashHasher<A: AlgorithmId = Algorithm> {
    algorithm: A,
    state: Hasher,
}

impl<A: AlgorithmId> MultihashHasher<A> {
    pub fn new(algorithm: A) -> Self {
        MultihashHasher {
            algorithm,
            state: Hasher::new(algorithm.descriptor().algorithm),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Only a fully fed hasher yields an envelope
    pub fn finalize(self) -> Envelope<A> {
        Envelope::from_native(self.algorithm, self.state.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MultihashError, base::Base};
    use std::io::{self, Cursor};

    #[test]
    fn test_sha1_vector() {
        let mh = digest(Algorithm::Sha1, b"test");
        assert_eq!(
            mh.encode(Base::Hex).unwrap(),
            "1114a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
        assert_eq!(
            mh.encode(Base::Base58).unwrap(),
            "5dt9CqvXK9qs7vazf7k7ZRqe28VPTg"
        );
    }

    #[test]
    fn test_truncated_digest() {
        let full = digest(Algorithm::Sha2_512, b"payload");
        let truncated = truncated_digest(Algorithm::Sha2_512, b"payload", 16).unwrap();
        assert_eq!(truncated.to_bytes().len(), 18);
        assert_eq!(truncated.digest(), &full.digest()[..16]);
        assert_eq!(truncated.full_digest(), full.digest());
    }

    #[test]
    fn test_truncated_digest_rejects() {
        for length in [0, 21, 300] {
            assert!(matches!(
                truncated_digest(Algorithm::Sha1, b"payload", length),
                Err(MultihashError::InvalidLength { .. })
            ));
        }
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let data = b"streamed payload".repeat(10_000);
        for algorithm in Algorithm::ALL {
            let streamed = digest_streaming(algorithm, Cursor::new(&data)).unwrap();
            assert_eq!(streamed, digest(algorithm, &data));
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream cut"))
        }
    }

    #[test]
    fn test_streaming_error_yields_no_envelope() {
        assert!(matches!(
            digest_streaming(Algorithm::Sha2_256, FailingReader),
            Err(MultihashError::Io(_))
        ));
    }

    #[test]
    fn test_weak_digest() {
        let weak = weak_digest("sha3-512", b"payload").unwrap();
        assert_eq!(weak.name(), "sha3-512");
        assert_eq!(weak, digest(Algorithm::Sha3_512, b"payload"));
        assert!(matches!(
            weak_digest("md5", b"payload"),
            Err(MultihashError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_incremental_weak_hasher() {
        let descriptor = lookup_by_name("blake2b-512").unwrap();
        let mut hasher = MultihashHasher::new(descriptor);
        hasher.update(b"pay");
        hasher.update(b"load");
        let weak = hasher.finalize();
        assert_eq!(weak.to_bytes(), digest(Algorithm::Blake2b512, b"payload").to_bytes());
    }
}

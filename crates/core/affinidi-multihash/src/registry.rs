//! Hash algorithm registry
//!
//! Every supported hash function is identified on the wire by a single byte
//! taken from the multicodec table, and by a lower-kebab name for callers that
//! pick the algorithm at runtime.
//!
//! See: <https://github.com/multiformats/multicodec/blob/master/table.csv>

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{MultihashError, Result};

// ****************************************************************************
// Multihash Codes
// ****************************************************************************
pub const SHA1: u8 = 0x11;
pub const SHA2_256: u8 = 0x12;
pub const SHA2_512: u8 = 0x13;
pub const SHA3_512: u8 = 0x14;
pub const SHA3_384: u8 = 0x15;
pub const SHA3_256: u8 = 0x16;
pub const SHA3_224: u8 = 0x17;
pub const BLAKE2B_512: u8 = 0x40;
pub const BLAKE2S_256: u8 = 0x41;

/// Supported hash algorithms (closed set, resolved at compile time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Sha1,
    Sha2_256,
    Sha2_512,
    Sha3_512,
    Sha3_384,
    Sha3_256,
    Sha3_224,
    Blake2b512,
    Blake2s256,
}

/// Static description of a registered algorithm
#[derive(Debug)]
pub struct AlgorithmDescriptor {
    pub algorithm: Algorithm,
    /// One byte multihash code
    pub code: u8,
    /// Native digest length in bytes
    pub length: usize,
    pub name: &'static str,
}

/// Algorithm identity is the code, nothing else.
impl PartialEq for AlgorithmDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for AlgorithmDescriptor {}

/// The registry. Order matches the [`Algorithm`] discriminants.
pub static REGISTRY: [AlgorithmDescriptor; 9] = [
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha1,
        code: SHA1,
        length: 20,
        name: "sha1",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha2_256,
        code: SHA2_256,
        length: 32,
        name: "sha256",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha2_512,
        code: SHA2_512,
        length: 64,
        name: "sha512",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha3_512,
        code: SHA3_512,
        length: 64,
        name: "sha3-512",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha3_384,
        code: SHA3_384,
        length: 48,
        name: "sha3-384",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha3_256,
        code: SHA3_256,
        length: 32,
        name: "sha3-256",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Sha3_224,
        code: SHA3_224,
        length: 28,
        name: "sha3-224",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Blake2b512,
        code: BLAKE2B_512,
        length: 64,
        name: "blake2b-512",
    },
    AlgorithmDescriptor {
        algorithm: Algorithm::Blake2s256,
        code: BLAKE2S_256,
        length: 32,
        name: "blake2s-256",
    },
];

/// Find a registered algorithm by its multihash code
pub fn lookup_by_code(code: u8) -> Result<&'static AlgorithmDescriptor> {
    REGISTRY
        .iter()
        .find(|d| d.code == code)
        .ok_or_else(|| MultihashError::UnknownAlgorithm(format!("0x{code:02x}")))
}

/// Find a registered algorithm by name (case-sensitive, e.g. `sha3-512`)
pub fn lookup_by_name(name: &str) -> Result<&'static AlgorithmDescriptor> {
    REGISTRY
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| MultihashError::UnknownAlgorithm(name.to_string()))
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Sha1,
        Algorithm::Sha2_256,
        Algorithm::Sha2_512,
        Algorithm::Sha3_512,
        Algorithm::Sha3_384,
        Algorithm::Sha3_256,
        Algorithm::Sha3_224,
        Algorithm::Blake2b512,
        Algorithm::Blake2s256,
    ];

    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        &REGISTRY[self as usize]
    }

    pub fn code(self) -> u8 {
        self.descriptor().code
    }

    /// Native digest length in bytes
    pub fn length(self) -> usize {
        self.descriptor().length
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MultihashError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(lookup_by_name(s)?.algorithm)
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = MultihashError;

    fn try_from(code: u8) -> Result<Self> {
        Ok(lookup_by_code(code)?.algorithm)
    }
}

impl TryFrom<String> for Algorithm {
    type Error = MultihashError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.name().to_string()
    }
}

/// Common view over the strict [`Algorithm`] and a runtime resolved
/// registry entry. Both envelope flavours are generic over this.
pub trait AlgorithmId: Copy + fmt::Debug {
    fn from_descriptor(descriptor: &'static AlgorithmDescriptor) -> Self;

    fn descriptor(&self) -> &'static AlgorithmDescriptor;

    fn code(&self) -> u8 {
        self.descriptor().code
    }
}

impl AlgorithmId for Algorithm {
    fn from_descriptor(descriptor: &'static AlgorithmDescriptor) -> Self {
        descriptor.algorithm
    }

    fn descriptor(&self) -> &'static AlgorithmDescriptor {
        Algorithm::descriptor(*self)
    }
}

impl AlgorithmId for &'static AlgorithmDescriptor {
    fn from_descriptor(descriptor: &'static AlgorithmDescriptor) -> Self {
        descriptor
    }

    fn descriptor(&self) -> &'static AlgorithmDescriptor {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_matches_enum() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.descriptor().algorithm, algorithm);
        }
    }

    #[test]
    fn test_codes_unique_and_lengths_fit() {
        for (i, a) in REGISTRY.iter().enumerate() {
            assert!(a.length > 0 && a.length <= u8::MAX as usize);
            for b in REGISTRY.iter().skip(i + 1) {
                assert_ne!(a.code, b.code);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_lookup_by_code() {
        assert_eq!(lookup_by_code(0x11).unwrap().name, "sha1");
        assert_eq!(lookup_by_code(0x41).unwrap().algorithm, Algorithm::Blake2s256);
        assert!(matches!(
            lookup_by_code(0x00),
            Err(MultihashError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_lookup_by_name_is_case_sensitive() {
        assert_eq!(lookup_by_name("sha3-512").unwrap().code, SHA3_512);
        assert!(lookup_by_name("SHA3-512").is_err());
        assert!(lookup_by_name("shake-128").is_err());
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        for algorithm in Algorithm::ALL {
            let name = algorithm.to_string();
            assert_eq!(name.parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(Algorithm::try_from(algorithm.code()).unwrap(), algorithm);
        }
    }

    #[test]
    fn test_descriptor_equality_is_by_code() {
        let a = lookup_by_name("sha256").unwrap();
        let b = lookup_by_code(SHA2_256).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, lookup_by_code(SHA3_256).unwrap());
    }
}

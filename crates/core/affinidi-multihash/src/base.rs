//! Text encodings for serialized multihashes
//!
//! Unlike multibase, the encoded text carries no prefix character, so when no
//! base is supplied it has to be inferred from the character set of the text
//! (see [`infer_base`]).

use std::{fmt, str::FromStr};

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{MultihashError, Result};

/// Bitcoin base58 alphabet (no `0`, `O`, `I` or `l`)
const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Candidate text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    Hex,
    /// Reserved. Every encode/decode attempt fails with `UnsupportedBase`.
    Base32,
    Base58,
    Base64,
}

impl Base {
    /// Bases that can actually be encoded and decoded
    pub const SUPPORTED: [Base; 3] = [Base::Hex, Base::Base58, Base::Base64];

    pub fn name(self) -> &'static str {
        match self {
            Base::Hex => "hex",
            Base::Base32 => "base32",
            Base::Base58 => "base58",
            Base::Base64 => "base64",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Base {
    type Err = MultihashError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hex" => Ok(Base::Hex),
            "base32" => Ok(Base::Base32),
            "base58" => Ok(Base::Base58),
            "base64" => Ok(Base::Base64),
            _ => Err(MultihashError::UnsupportedBase(s.to_string())),
        }
    }
}

/// Render bytes as text in the given base
pub fn encode(base: Base, bytes: &[u8]) -> Result<String> {
    match base {
        Base::Hex => Ok(hex::encode(bytes)),
        Base::Base32 => Err(MultihashError::UnsupportedBase(base.to_string())),
        Base::Base58 => Ok(bs58::encode(bytes).into_string()),
        Base::Base64 => Ok(BASE64_STANDARD.encode(bytes)),
    }
}

/// Inverse of [`encode`]
pub fn decode(base: Base, text: &str) -> Result<Vec<u8>> {
    let decoded = match base {
        Base::Hex => hex::decode(text).map_err(|e| e.to_string()),
        Base::Base32 => return Err(MultihashError::UnsupportedBase(base.to_string())),
        Base::Base58 => bs58::decode(text).into_vec().map_err(|e| e.to_string()),
        Base::Base64 => BASE64_STANDARD.decode(text).map_err(|e| e.to_string()),
    };

    decoded.map_err(|reason| MultihashError::DecodeError {
        base: base.to_string(),
        reason,
    })
}

/// Guess the base of `text` from its characters.
///
/// Checks run in a fixed order and the first match wins: hex, base32, base58,
/// then base64 as the catch-all. Short hex strings are often valid base58 too;
/// the ordering always resolves them to hex. Base64 text that happens to avoid
/// `+`, `/`, `=` and the base58 exclusions is classified as base58, which is a
/// known limitation of prefix-less encodings.
pub fn infer_base(text: &str) -> Result<Base> {
    let bytes = text.as_bytes();

    let base = if bytes.is_empty() {
        return Err(MultihashError::AmbiguousOrUnknown);
    } else if bytes.len() % 2 == 0 && bytes.iter().all(u8::is_ascii_hexdigit) {
        Base::Hex
    } else if is_base32(bytes) {
        Base::Base32
    } else if bytes.iter().all(|c| BASE58_ALPHABET.contains(c)) {
        Base::Base58
    } else if bytes
        .iter()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'/' | b'='))
    {
        Base::Base64
    } else {
        debug!("no base matches text ({text})");
        return Err(MultihashError::AmbiguousOrUnknown);
    };

    debug!("inferred base ({base}) for text ({text})");
    Ok(base)
}

/// RFC 4648 alphabet (`A-Z2-7`) with optional trailing `=` padding
fn is_base32(bytes: &[u8]) -> bool {
    let body_len = bytes
        .iter()
        .rposition(|&c| c != b'=')
        .map_or(0, |last| last + 1);

    body_len > 0
        && bytes[..body_len]
            .iter()
            .all(|c| c.is_ascii_uppercase() || (b'2'..=b'7').contains(c))
}

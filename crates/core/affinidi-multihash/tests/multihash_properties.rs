use affinidi_multihash::{
    Algorithm, Base, Multihash, MultihashError, REGISTRY, WeakMultihash, check, check_with_base,
    decode, digest, encode, infer_base, truncated_digest, weak_digest,
};

fn payloads() -> Vec<Vec<u8>> {
    vec![
        b"".to_vec(),
        b"test".to_vec(),
        b"The quick brown fox jumps over the lazy dog".to_vec(),
        (0u8..=255).cycle().take(4096).collect(),
    ]
}

/// Parsing the decoded text gives back the same envelope, in every base.
#[test]
fn round_trip_every_base() {
    for algorithm in Algorithm::ALL {
        for payload in payloads() {
            let mh = digest(algorithm, &payload);
            for base in Base::SUPPORTED {
                let text = encode(base, &mh.to_bytes()).unwrap();
                let bytes = decode(base, &text).unwrap();
                assert_eq!(Multihash::from_bytes(&bytes).unwrap(), mh);
                assert_eq!(Multihash::decode_with(base, &text).unwrap(), mh);
            }
        }
    }
}

/// A multihash always checks against its own payload.
#[test]
fn check_soundness() {
    for algorithm in Algorithm::ALL {
        for payload in payloads() {
            let mh = digest(algorithm, &payload);
            for base in Base::SUPPORTED {
                let text = mh.encode(base).unwrap();
                assert!(check_with_base(base, &text, &payload).unwrap());
            }

            // Hex and base58 text is always classified correctly
            assert!(check(&mh.encode(Base::Hex).unwrap(), &payload).unwrap());
            assert!(check(&mh.encode(Base::Base58).unwrap(), &payload).unwrap());

            // Base64 is only recognisable when it uses its own characters
            let text = mh.encode(Base::Base64).unwrap();
            if text.contains(['+', '/', '=']) {
                assert!(check(&text, &payload).unwrap());
            }
        }
    }
}

/// A multihash never checks against a different payload.
#[test]
fn check_completeness() {
    for algorithm in Algorithm::ALL {
        for payload in payloads() {
            let mh = digest(algorithm, &payload);
            let mut other = payload.clone();
            other.push(0);
            for base in Base::SUPPORTED {
                let text = mh.encode(base).unwrap();
                assert!(!check_with_base(base, &text, &other).unwrap());
            }
            assert!(!check(&mh.encode(Base::Hex).unwrap(), &other).unwrap());
        }
    }
}

#[test]
fn truncation_validity() {
    for algorithm in Algorithm::ALL {
        for length in 1..=algorithm.length() {
            let mh = truncated_digest(algorithm, b"payload", length).unwrap();
            assert_eq!(mh.to_bytes().len(), 2 + length);
            assert!(check(&mh.encode(Base::Hex).unwrap(), b"payload").unwrap());
        }
    }
}

#[test]
fn truncation_rejection() {
    for algorithm in Algorithm::ALL {
        for length in [0, algorithm.length() + 1] {
            assert!(matches!(
                truncated_digest(algorithm, b"payload", length),
                Err(MultihashError::InvalidLength { .. })
            ));
        }
    }
}

/// Declared length 0x40 with only 11 digest bytes following.
#[test]
fn header_corruption_detection() {
    let text = "1340ee26b0dd4af7e749aa1a8e";
    assert_eq!(infer_base(text).unwrap(), Base::Hex);

    let err = WeakMultihash::decode(text).unwrap_err();
    assert_eq!(err.to_string(), "Corrupted MultihasDigest: invalid length");

    let err = check(text, b"test").unwrap_err();
    assert!(matches!(err, MultihashError::CorruptedHeader(ref reason) if reason == "invalid length"));
}

#[test]
fn weak_strict_equivalence() {
    for descriptor in REGISTRY.iter() {
        for payload in payloads() {
            let weak = weak_digest(descriptor.name, &payload).unwrap();
            let strict = digest(descriptor.algorithm, &payload);
            assert_eq!(weak.to_bytes(), strict.to_bytes());
            assert_eq!(weak, strict);
        }
    }
}

#[test]
fn sha1_test_vectors() {
    let mh = digest(Algorithm::Sha1, b"test");
    assert_eq!(
        mh.encode(Base::Hex).unwrap(),
        "1114a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
    );
    assert_eq!(
        mh.encode(Base::Base58).unwrap(),
        "5dt9CqvXK9qs7vazf7k7ZRqe28VPTg"
    );
    assert_eq!(
        mh.encode(Base::Base64).unwrap(),
        "ERSpSo/lzLGbphxMCHPTkemHmC+70w=="
    );

    for text in [
        "1114a94a8fe5ccb19ba61c4c0873d391e987982fbbd3",
        "5dt9CqvXK9qs7vazf7k7ZRqe28VPTg",
        "ERSpSo/lzLGbphxMCHPTkemHmC+70w==",
    ] {
        assert_eq!(Multihash::decode(text).unwrap(), mh);
        assert!(check(text, b"test").unwrap());
    }
}

/// Hex output is always read back as hex, even when it is valid base58 too.
#[test]
fn hex_inference_wins() {
    for algorithm in Algorithm::ALL {
        for payload in payloads() {
            let text = digest(algorithm, &payload).encode(Base::Hex).unwrap();
            assert_eq!(infer_base(&text).unwrap(), Base::Hex);
        }
    }
    // Digits only, so also valid base58
    assert_eq!(infer_base("1122334455").unwrap(), Base::Hex);
}

#[test]
fn unknown_algorithm_name() {
    assert!(matches!(
        weak_digest("shake-128", b"payload"),
        Err(MultihashError::UnknownAlgorithm(_))
    ));
}

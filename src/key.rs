pub(crate) const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
pub(crate) const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[inline]
pub(crate) fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash = (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A key prepared once and reused across lookups: the key text plus its
/// precomputed FNV-1a hash.
///
/// Lookups compare against the document's raw bytes, so the text here must
/// include escape codes exactly as they appear in the source (`a\"b`, not
/// `a"b`).
///
/// ```
/// let doc = flatjson::parse(r#"{"name":"flat"}"#)?;
/// let name = flatjson::HashedKey::new("name");
/// assert_eq!(doc.root().lookup(&name).as_str(), Some("flat"));
/// # Ok::<(), flatjson::ParseError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HashedKey<'k> {
    pub(crate) text: &'k str,
    pub(crate) hash: u64,
}

impl<'k> HashedKey<'k> {
    pub fn new(text: &'k str) -> Self {
        Self {
            text,
            hash: fnv1a(text.as_bytes()),
        }
    }
}

/// Like [`HashedKey`] but with the text discarded: lookups compare hash and
/// length only, skipping the byte-exact check. Two different keys of equal
/// length may collide on the hash, and the caller accepts that risk.
#[derive(Debug, Clone, Copy)]
pub struct HashedKeyStripped {
    pub(crate) hash: u64,
    pub(crate) len: usize,
}

impl HashedKeyStripped {
    pub fn new(text: &str) -> Self {
        Self {
            hash: fnv1a(text.as_bytes()),
            len: text.len(),
        }
    }
}

impl From<HashedKey<'_>> for HashedKeyStripped {
    fn from(key: HashedKey<'_>) -> Self {
        Self {
            hash: key.hash,
            len: key.text.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(b"", 0xcbf2_9ce4_8422_2325)]
    #[case(b"a", 0xaf63_dc4c_8601_ec8c)]
    #[case(b"foobar", 0x8594_4171_f739_67e8)]
    fn test_fnv1a_reference_vectors(#[case] input: &[u8], #[case] expected: u64) {
        assert_eq!(fnv1a(input), expected);
    }

    #[rstest::rstest]
    fn test_hashed_key_matches_raw_hash() {
        let key = HashedKey::new("answer");
        assert_eq!(key.hash, fnv1a(b"answer"));
        assert_eq!(key.text, "answer");
    }

    #[rstest::rstest]
    fn test_stripped_from_full_keeps_hash_and_len() {
        let full = HashedKey::new("a\\\"b");
        let stripped = HashedKeyStripped::from(full);
        assert_eq!(stripped.hash, full.hash);
        assert_eq!(stripped.len, 4);
        assert_eq!(stripped.hash, HashedKeyStripped::new("a\\\"b").hash);
    }
}

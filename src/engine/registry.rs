//! Hash algorithm registry: identifier string → streaming hasher.

use std::fmt;
use std::str::FromStr;

use crate::engine::hashing::{Blake3Digest, BytesDigest, Digester, StreamHasher, Xxh64Digest};
use crate::error::HashError;

/// Closed set of supported algorithms. Selected once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    /// Non-cryptographic 64-bit xxHash, seed 0.
    XxHash64,
    Blake3,
}

/// Identifier table. Lookup is case-insensitive; the first column is the canonical name.
const REGISTRY: &[(&str, HashAlgorithm)] = &[
    ("MD5", HashAlgorithm::Md5),
    ("SHA1", HashAlgorithm::Sha1),
    ("SHA256", HashAlgorithm::Sha256),
    ("XXHASH64", HashAlgorithm::XxHash64),
    ("BLAKE3", HashAlgorithm::Blake3),
];

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::XxHash64,
        HashAlgorithm::Blake3,
    ];

    /// Canonical identifier (as accepted by `--hash`).
    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, alg)| *alg == self)
            .map(|(name, _)| *name)
            .unwrap_or("UNKNOWN")
    }

    /// Fresh incremental state for one file.
    pub fn digester(self) -> Box<dyn Digester> {
        match self {
            HashAlgorithm::Md5 => Box::new(BytesDigest::<md5::Md5>::default()),
            HashAlgorithm::Sha1 => Box::new(BytesDigest::<sha1::Sha1>::default()),
            HashAlgorithm::Sha256 => Box::new(BytesDigest::<sha2::Sha256>::default()),
            HashAlgorithm::XxHash64 => Box::new(Xxh64Digest::default()),
            HashAlgorithm::Blake3 => Box::new(Blake3Digest::default()),
        }
    }

    /// Comma-separated identifiers, for help and error text.
    pub fn names() -> String {
        REGISTRY
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        REGISTRY
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(id))
            .map(|(_, alg)| *alg)
            .ok_or_else(|| HashError::UnsupportedAlgorithm(s.to_string()))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve an identifier to its streaming hasher, or fail naming the identifier.
pub fn lookup(identifier: &str) -> Result<StreamHasher, HashError> {
    identifier.parse::<HashAlgorithm>().map(StreamHasher::new)
}

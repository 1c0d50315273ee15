//! Streaming hasher adapter: one "read a stream, return a hex digest" shape for every algorithm.

use sha2::Digest;
use std::io::{ErrorKind, Read};

use crate::engine::registry::HashAlgorithm;
use crate::error::HashError;
use crate::utils::config::HashingConsts;

/// Incremental digest state for one input.
pub trait Digester: Send {
    fn update(&mut self, data: &[u8]);

    /// Consume the state and render the digest as lowercase hex.
    fn finish(self: Box<Self>) -> String;
}

/// Any RustCrypto `Digest` (MD5, SHA1, SHA256): finalize to bytes, hex-encode.
#[derive(Default)]
pub struct BytesDigest<D>(D);

impl<D: Digest + Send> Digester for BytesDigest<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finish(self: Box<Self>) -> String {
        hex::encode(self.0.finalize())
    }
}

#[derive(Default)]
pub struct Blake3Digest(blake3::Hasher);

impl Digester for Blake3Digest {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finish(self: Box<Self>) -> String {
        self.0.finalize().to_hex().to_string()
    }
}

/// xxHash64 finalizes to a `u64`, not a byte array.
pub struct Xxh64Digest(xxhash_rust::xxh64::Xxh64);

impl Default for Xxh64Digest {
    fn default() -> Self {
        Self(xxhash_rust::xxh64::Xxh64::new(0))
    }
}

impl Digester for Xxh64Digest {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finish(self: Box<Self>) -> String {
        hex_u64(self.0.digest())
    }
}

/// Render a 64-bit hash as hex without zero padding (`0x0abc` → `"abc"`).
/// Keeps digests (and renamed filenames) identical to those produced by earlier releases.
pub fn hex_u64(value: u64) -> String {
    format!("{value:x}")
}

/// Uniform streaming hash function for one algorithm. Cheap to copy into every worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamHasher {
    algorithm: HashAlgorithm,
}

impl StreamHasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash `reader` to exhaustion in fixed-size chunks. Memory use does not depend on input size.
    pub fn hash<R: Read>(&self, mut reader: R) -> Result<String, HashError> {
        let mut digester = self.algorithm.digester();
        let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(HashError::Read(e)),
            };
            digester.update(&buffer[..n]);
        }
        Ok(digester.finish())
    }

    /// Hash an in-memory buffer (same result as streaming it).
    pub fn hash_bytes(&self, data: &[u8]) -> String {
        let mut digester = self.algorithm.digester();
        digester.update(data);
        digester.finish()
    }
}

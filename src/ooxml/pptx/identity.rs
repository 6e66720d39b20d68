//! Content-addressed shape identity.
//!
//! A shape's identity is a hash of its semantic fields. The field walk is
//! the derived [`Hash`] implementation of the model types; the bytes it
//! produces are fed into SHA-256 instead of the randomly seeded std hasher,
//! so identities are stable across runs and threads.

use std::fmt;
use std::hash::{Hash, Hasher};

use sha2::{Digest, Sha256};

/// Structural identity of a shape.
///
/// Two shapes with identical content have the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHash(u64);

impl ShapeHash {
    /// Hash any value through its [`Hash`] implementation.
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = DigestHasher::new();
        value.hash(&mut hasher);
        ShapeHash(hasher.finish())
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// [`Hasher`] adapter over SHA-256. `finish` folds the first eight digest
/// bytes into a `u64`.
struct DigestHasher(Sha256);

impl DigestHasher {
    fn new() -> Self {
        DigestHasher(Sha256::new())
    }
}

impl Hasher for DigestHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.0.clone().finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }
}

//! Deterministic per-object randomness.
//!
//! Each object gets its own generator keyed by a stable hash of its
//! identifier. The generator lives only for one estimate, so evaluation
//! order and concurrency cannot change the values an object receives.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Generator used for orbit orientation draws.
///
/// ChaCha8 output is value-stable across `rand_chacha` releases, so a given
/// identifier keeps its orbit between builds.
pub type OrbitRng = ChaCha8Rng;

/// Hash an identifier into a seed (64-bit FNV-1a over its UTF-8 bytes).
pub fn seed_from_identifier(identifier: &str) -> u64 {
    identifier.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Fresh generator for an object identifier.
pub fn rng_for_identifier(identifier: &str) -> OrbitRng {
    OrbitRng::seed_from_u64(seed_from_identifier(identifier))
}

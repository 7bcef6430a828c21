//! Keyed 64-bit non-cryptographic digest used to localize chunk damage.
//!
//! Not cryptographic, not authenticated — purely a corruption-detection
//! checksum. The seed is fixed so bundles produced and consumed by this
//! crate always agree on the digest of identical bytes.

use xxhash_rust::xxh64::xxh64;

/// Seed shared by every digest computed in this crate. Matches the
/// well-known-value seed used by the bundle format this codec speaks.
pub const SEED: u64 = 0xDEAD_BEEF;

/// Digest a byte range. Deterministic, byte-order-independent, defined for
/// zero-length input.
pub fn digest(bytes: &[u8], seed: u64) -> u64 {
    xxh64(bytes, seed)
}

/// Render `digest(bytes[skip..skip+len], SEED)` as lowercase hex with no
/// leading zero padding, e.g. `%PRIx64` style.
pub fn digest_hex(bytes: &[u8], skip: usize, len: usize) -> String {
    let end = skip.saturating_add(len).min(bytes.len());
    let start = skip.min(end);
    format!("{:x}", digest(&bytes[start..end], SEED))
}

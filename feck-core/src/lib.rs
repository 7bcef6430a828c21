//! Reed-Solomon erasure-coded recovery bundles for opaque byte buffers.
//!
//! Three contractual operations: [`digest_hex`] (a keyed 64-bit localization
//! digest), [`prepare`] (build a self-describing recovery bundle for a
//! buffer), and [`repair`] (use a bundle to recover damaged bytes).

pub mod bundle;
mod chunking;
pub mod diagnostics;
pub mod digest;
pub mod error;
pub mod prepare;
pub mod repair;
pub mod rs_codec;

pub use diagnostics::Verbosity;
pub use error::{FeckError, Result};

/// `digest_hex(bytes, skip, len)` from the bundle format's external
/// interface: lowercase hex, no `0x` prefix, no leading-zero padding.
pub fn digest_hex(bytes: &[u8], skip: usize, len: usize) -> String {
    digest::digest_hex(bytes, skip, len)
}

/// Build a recovery bundle for `data` under shape `(k, m)`.
pub fn prepare(data: &[u8], k: usize, m: usize, verbosity: Verbosity) -> Result<Vec<u8>> {
    prepare::prepare(data, k, m, verbosity)
}

/// Recover `data` using `bundle_bytes`, returning the original byte sequence.
pub fn repair(data: &[u8], bundle_bytes: Vec<u8>, verbosity: Verbosity) -> Result<Vec<u8>> {
    repair::repair(data, bundle_bytes, verbosity)
}

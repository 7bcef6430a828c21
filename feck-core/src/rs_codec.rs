use crate::error::{FeckError, Result};
use reed_solomon_erasure::galois_8::ReedSolomon;

/// Reed-Solomon erasure codec over GF(256), parameterized by `(k, m)` where
/// `k` is the primary-chunk count and `m` is the *total* chunk count
/// (primaries + repairs) — matching the bundle format's shape parameters.
///
/// Constructing an `RsCodec` performs the one-shot GF(256) table
/// initialization the contract requires happen-before any encode/decode;
/// since each instance owns its own tables there is no shared global state
/// for callers to race on.
pub struct RsCodec {
    pub k: usize,
    pub m: usize,
    inner: ReedSolomon,
}

impl RsCodec {
    pub fn new(k: usize, m: usize) -> Result<Self> {
        if k < 2 || k >= m || m > 255 {
            return Err(FeckError::InvalidShape { k, m });
        }
        let inner =
            ReedSolomon::new(k, m - k).map_err(|_| FeckError::InvalidShape { k, m })?;
        Ok(Self { k, m, inner })
    }

    /// Encode: `shards[0..k]` are read-only data shards, `shards[k..m]` are
    /// the parity/repair shards to be filled.
    pub fn encode(&self, shards: &mut [&mut [u8]]) -> Result<()> {
        self.inner.encode(shards).map_err(|e| FeckError::SingularSystem(e.to_string()))
    }

    /// Reconstruct: `shards[i] = None` for a missing/damaged block at
    /// logical index `i`; present entries must be populated in logical-index
    /// order. On success every primary slot `[0, k)` is `Some`.
    pub fn reconstruct(&self, shards: &mut [Option<Vec<u8>>]) -> Result<()> {
        self.inner.reconstruct(shards).map_err(|e| FeckError::SingularSystem(e.to_string()))
    }
}

//! `BundleCodec::prepare` — partitions a byte buffer into `k` primary chunks
//! (zero-padding any that run off the end of `data`), computes the
//! Reed-Solomon repair chunks, and assembles the self-describing bundle.

use crate::bundle::Bundle;
use crate::chunking::primary_chunk;
use crate::diagnostics::Verbosity;
use crate::digest::{digest, SEED};
use crate::error::{FeckError, Result};
use crate::rs_codec::RsCodec;

/// Prepare a recovery bundle for `data` under shape `(k, m)`.
///
/// `2 <= k < m <= 255` and `data` must be non-empty; otherwise fails with
/// `InvalidShape`.
pub fn prepare(data: &[u8], k: usize, m: usize, verbosity: Verbosity) -> Result<Vec<u8>> {
    if k < 2 || k >= m || m > 255 || m < 1 || data.is_empty() {
        return Err(FeckError::InvalidShape { k, m });
    }
    let len = data.len();
    let chunksize = len.div_ceil(k);
    let padding = k * chunksize - len;
    verbosity.shape_dump(k, m, len, chunksize, padding);

    // Every primary chunk is built through `primary_chunk`, which
    // zero-pads whatever part of it runs past `data`'s end — ordinarily
    // only the final chunk, but a wide shape (`k` large relative to `len`)
    // can push that past-the-end region earlier, or make a chunk wholly
    // zero.
    let mut primary_owned: Vec<Vec<u8>> =
        (0..k).map(|i| primary_chunk(data, i, chunksize)).collect();

    let len_u32: u32 = len.try_into().map_err(|_| FeckError::AllocationFailed {
        requested_bytes: len as u128,
    })?;
    let mut bundle = Bundle::allocate(k, m, len_u32, chunksize as u32)?;

    for (i, chunk) in primary_owned.iter().enumerate() {
        bundle.set_digest_at(i, digest(chunk, SEED));
    }

    // Run the Reed-Solomon encode: primaries are read-only input, repair
    // slots are freshly allocated output.
    let rs = RsCodec::new(k, m)?;
    let repair_count = m - k;
    let mut repair_bufs: Vec<Vec<u8>> = (0..repair_count).map(|_| vec![0u8; chunksize]).collect();
    {
        let mut shard_refs: Vec<&mut [u8]> = Vec::with_capacity(m);
        for p in &mut primary_owned {
            shard_refs.push(p.as_mut_slice());
        }
        for r in &mut repair_bufs {
            shard_refs.push(r.as_mut_slice());
        }
        rs.encode(&mut shard_refs)?;
    }

    for (j, repair) in repair_bufs.into_iter().enumerate() {
        bundle.repair_chunk_mut(j).copy_from_slice(&repair);
        bundle.set_digest_at(k + j, digest(bundle.repair_chunk(j), SEED));
    }

    Ok(bundle.into_bytes())
}

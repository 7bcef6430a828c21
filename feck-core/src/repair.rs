//! `BundleCodec::repair` — verifies a (possibly damaged) byte buffer against
//! a bundle's digest table, substitutes intact repair chunks for damaged
//! primaries, and drives `RsCodec::reconstruct` to recover the original
//! bytes.

use crate::bundle::Bundle;
use crate::chunking::{live_len, primary_chunk};
use crate::diagnostics::Verbosity;
use crate::digest::{digest, SEED};
use crate::error::{FeckError, Result};
use crate::rs_codec::RsCodec;

/// Repair `data` (length must match the bundle's recorded original length)
/// using the repair chunks and digests carried in `bundle_bytes`.
///
/// Returns `data` unchanged (as a fresh copy) if every primary chunk already
/// verifies. Fails with `Unrepairable` if more primaries are damaged than
/// there are intact repair chunks to substitute.
pub fn repair(data: &[u8], bundle_bytes: Vec<u8>, verbosity: Verbosity) -> Result<Vec<u8>> {
    let bundle = Bundle::parse(bundle_bytes)?;
    let header = bundle.header();

    if data.len() != header.len as usize {
        return Err(FeckError::LengthMismatch { expected: header.len, actual: data.len() });
    }

    let k = header.k;
    let m = header.m;
    let len = header.len as usize;
    let chunksize = header.chunksize as usize;

    // Every primary chunk is rebuilt through `primary_chunk`, the same
    // helper `prepare` used, so the two never disagree about which bytes
    // run off the end of `data` (ordinarily just the final chunk, but a
    // wide shape can push that earlier, or leave a chunk wholly zero).
    let mut good_primary = vec![false; k];
    for i in 0..k {
        let chunk = primary_chunk(data, i, chunksize);
        let actual = digest(&chunk, SEED);
        let expected = bundle.digest_at(i);
        verbosity.digest_compare("primary", i, expected, actual);
        good_primary[i] = actual == expected;
    }

    let bad_indices: Vec<usize> = (0..k).filter(|&i| !good_primary[i]).collect();
    if bad_indices.is_empty() {
        verbosity.repair_feasibility(0, 0);
        return Ok(data.to_vec());
    }

    let repair_count = m - k;
    let mut good_repair = vec![false; repair_count];
    for j in 0..repair_count {
        let actual = digest(bundle.repair_chunk(j), SEED);
        let expected = bundle.digest_at(k + j);
        verbosity.digest_compare("repair", j, expected, actual);
        good_repair[j] = actual == expected;
    }
    let available = good_repair.iter().filter(|&&g| g).count();
    verbosity.repair_feasibility(bad_indices.len(), available);

    if bad_indices.len() > available {
        return Err(FeckError::Unrepairable { bad: bad_indices.len(), available });
    }

    // Build the k-wide working set. Good primaries stay in their slot; bad
    // primaries are replaced in place by the next unused intact repair chunk,
    // scanned in ascending order, addressed by its true repair index.
    let mut working: Vec<Vec<u8>> = Vec::with_capacity(k);
    let mut block_indices = vec![0usize; k];
    let mut next_repair = 0usize;
    for i in 0..k {
        if good_primary[i] {
            working.push(primary_chunk(data, i, chunksize));
            block_indices[i] = i;
        } else {
            while !good_repair[next_repair] {
                next_repair += 1;
            }
            working.push(bundle.repair_chunk(next_repair).to_vec());
            block_indices[i] = k + next_repair;
            next_repair += 1;
        }
    }

    // Seed a k+m-wide shard vector: primary slots from the working set at
    // their logical index, repair slots left absent (not needed for decode).
    let mut shards: Vec<Option<Vec<u8>>> = vec![None; m];
    for i in 0..k {
        shards[block_indices[i]] = Some(working[i].clone());
    }

    let rs = RsCodec::new(k, m)?;
    rs.reconstruct(&mut shards)?;

    let mut recovered = Vec::with_capacity(k);
    for i in 0..k {
        recovered.push(shards[i].take().ok_or_else(|| {
            FeckError::SingularSystem("reconstruct left a primary slot empty".to_string())
        })?);
    }

    let mut out = Vec::with_capacity(len);
    for (i, chunk) in recovered.iter().enumerate() {
        out.extend_from_slice(&chunk[..live_len(i, len, chunksize)]);
    }
    Ok(out)
}

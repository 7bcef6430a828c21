//! Primary-chunk partitioning shared by `prepare` and `repair` so a chunk's
//! expected content never diverges between the two.
//!
//! `chunksize = ceil(len / k)` can make `k` large enough relative to `len`
//! that more than the final chunk runs off the end of the data — or lies
//! wholly beyond it (e.g. `len=3, k=5` gives `chunksize=1` and primary chunks
//! `3` and `4` have no live bytes at all). Every caller goes through here so
//! that case is handled once, by zero-padding, rather than by indexing
//! `data` out of bounds.

/// The owned, zero-padded bytes of primary chunk `i`.
pub(crate) fn primary_chunk(data: &[u8], i: usize, chunksize: usize) -> Vec<u8> {
    let start = i * chunksize;
    let mut buf = vec![0u8; chunksize];
    if start < data.len() {
        let end = (start + chunksize).min(data.len());
        buf[..end - start].copy_from_slice(&data[start..end]);
    }
    buf
}

/// How many of chunk `i`'s bytes are live (drawn from data of length `len`)
/// rather than zero padding.
pub(crate) fn live_len(i: usize, len: usize, chunksize: usize) -> usize {
    let start = i * chunksize;
    if start >= len {
        0
    } else {
        (len - start).min(chunksize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_shape_matches_plain_slicing() {
        let data: Vec<u8> = (0u8..12).collect();
        let chunksize = 4;
        assert_eq!(primary_chunk(&data, 0, chunksize), data[0..4]);
        assert_eq!(primary_chunk(&data, 2, chunksize), data[8..12]);
        assert_eq!(live_len(2, data.len(), chunksize), 4);
    }

    #[test]
    fn wide_shape_zero_pads_without_panicking() {
        let data = [0xAAu8, 0xBB, 0xCC];
        let chunksize = 1; // ceil(3/5)
        assert_eq!(primary_chunk(&data, 0, chunksize), vec![0xAA]);
        assert_eq!(primary_chunk(&data, 2, chunksize), vec![0xCC]);
        assert_eq!(primary_chunk(&data, 3, chunksize), vec![0]);
        assert_eq!(primary_chunk(&data, 4, chunksize), vec![0]);
        assert_eq!(live_len(3, data.len(), chunksize), 0);
        assert_eq!(live_len(4, data.len(), chunksize), 0);
    }

    #[test]
    fn partial_tail_chunk_zero_pads_remainder() {
        let data = [1u8, 2, 3, 4, 5];
        let chunksize = 2; // ceil(5/3)
        assert_eq!(primary_chunk(&data, 2, chunksize), vec![5, 0]);
        assert_eq!(live_len(2, data.len(), chunksize), 1);
    }
}
